//! Request dispatch: encoding by verb, one transport round trip,
//! classification into an [`Envelope`].

use std::sync::Arc;

use log::{debug, warn};
use serde_json::Value;

use crate::classify::{ResponseClassifier, UnauthenticatedOnly};
use crate::codec;
use crate::envelope::Envelope;
use crate::error::{VmwareError, VmwareErrorKind, VmwareResult};
use crate::headers::HeaderSet;
use crate::transport::{PreparedRequest, Transport};
use crate::types::{ApiRequest, Verb};

/// Executes [`ApiRequest`]s against one base URL.
pub struct Dispatcher<T> {
    base_url: String,
    transport: T,
    classifier: Arc<dyn ResponseClassifier>,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            classifier: Arc::new(UnauthenticatedOnly),
        }
    }

    pub fn with_classifier(mut self, classifier: impl ResponseClassifier + 'static) -> Self {
        self.classifier = Arc::new(classifier);
        self
    }

    /// Build the wire request.
    ///
    /// GET parameters become the query string. Any other verb sends them as a
    /// JSON body with `Content-Type`, and with `Content-Length` unless the
    /// verb is PUT. Empty parameters add nothing.
    pub fn prepare(&self, request: &ApiRequest, mut headers: HeaderSet) -> VmwareResult<PreparedRequest> {
        let mut url = format!("{}{}", self.base_url, request.path);
        let mut body = None;

        if !request.params.is_empty() {
            if request.verb == Verb::Get {
                let query = codec::build_query(&request.params);
                if !query.is_empty() {
                    url.push(if url.contains('?') { '&' } else { '?' });
                    url.push_str(&query);
                }
            } else {
                let payload = codec::encode_json_body(&request.params)?;
                headers.push_header("Content-Type", "application/json");
                // PUT requests go out without an explicit Content-Length.
                if request.verb != Verb::Put {
                    headers.push_header("Content-Length", payload.len());
                }
                body = Some(payload);
            }
        }

        Ok(PreparedRequest {
            verb: request.verb,
            url,
            headers,
            body,
        })
    }

    /// Prepare, execute, decode and classify. Errors are returned, not folded.
    pub async fn send(&self, request: ApiRequest, headers: HeaderSet) -> VmwareResult<Envelope> {
        let prepared = self.prepare(&request, headers)?;
        debug!("vCenter REST → {} {}", prepared.verb, prepared.url);

        let response = self.transport.execute(&prepared).await?;
        debug!(
            "vCenter REST ← {} {} ({} bytes)",
            response.status,
            request.path,
            response.body.len()
        );

        let payload = decode_body(&response.body)?;
        Ok(self.classifier.classify(response.status, payload))
    }

    /// The boundary every public operation goes through: a request that
    /// failed to build, or any fault while sending it, becomes a failure
    /// envelope.
    pub async fn dispatch(&self, request: VmwareResult<ApiRequest>, headers: HeaderSet) -> Envelope {
        let outcome = match request {
            Ok(request) => self.send(request, headers).await,
            Err(err) => Err(err),
        };
        if let Err(ref err) = outcome {
            if err.kind != VmwareErrorKind::InvalidArgument {
                warn!("vCenter REST call failed: {err}");
            }
        }
        Envelope::from_result(outcome)
    }
}

/// Empty bodies decode to `null`; anything else must be JSON.
pub fn decode_body(body: &str) -> VmwareResult<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| {
        let excerpt: String = body.chars().take(500).collect();
        let mut err = VmwareError::from(e);
        err.message = format!("{} — body: {excerpt}", err.message);
        err
    })
}
