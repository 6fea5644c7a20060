//! Session & endpoint façade.
//!
//! `VcenterClient` owns the immutable connection settings and a
//! [`Dispatcher`]. It keeps no per-call state: headers are built fresh for
//! every operation, and the session token is passed in by the caller each
//! time. One instance can therefore be shared across tasks (e.g. in an
//! `Arc`) without locking.
//!
//! Resource operations live in the `session`, `vm`, `hardware` and
//! `inventory` modules as further `impl` blocks on this type. All of them
//! return an [`Envelope`] and never fail otherwise.

use crate::classify::ResponseClassifier;
use crate::dispatcher::Dispatcher;
use crate::envelope::Envelope;
use crate::error::VmwareResult;
use crate::headers::HeaderSet;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{ApiRequest, ConnectionConfig, Params, Verb, VsphereConfig};

/// vCenter REST client.
pub struct VcenterClient<T = ReqwestTransport> {
    config: ConnectionConfig,
    dispatcher: Dispatcher<T>,
}

impl VcenterClient<ReqwestTransport> {
    /// Build a client over `reqwest` (does NOT create a session yet).
    pub fn new(config: &VsphereConfig) -> VmwareResult<Self> {
        let connection = ConnectionConfig::from_config(config);
        let transport = ReqwestTransport::new(&connection)?;
        Ok(Self::with_transport(connection, transport))
    }
}

impl<T: Transport> VcenterClient<T> {
    /// Build a client over any transport.
    pub fn with_transport(config: ConnectionConfig, transport: T) -> Self {
        let dispatcher = Dispatcher::new(config.base_url(), transport);
        Self { config, dispatcher }
    }

    /// Swap the response classifier (default: only the unauthenticated
    /// sentinel is a failure).
    pub fn with_classifier(mut self, classifier: impl ResponseClassifier + 'static) -> Self {
        self.dispatcher = self.dispatcher.with_classifier(classifier);
        self
    }

    /// Base URL for API calls.
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Current connection settings.
    pub fn connection(&self) -> &ConnectionConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher<T> {
        &self.dispatcher
    }

    /// Send `request` with only the session token header attached.
    pub(crate) async fn call(&self, token: &str, request: VmwareResult<ApiRequest>) -> Envelope {
        self.dispatcher
            .dispatch(request, HeaderSet::session_token(token))
            .await
    }

    /// Dispatch an arbitrary request under the session, for endpoints the
    /// typed operations do not cover. `path` is relative to the API root.
    pub async fn request(&self, token: &str, verb: Verb, path: &str, params: Params) -> Envelope {
        self.call(token, Ok(ApiRequest::new(verb, path).with_params(params)))
            .await
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::classify::AnyVapiError;
    use crate::transport::{MockTransport, RawResponse};
    use serde_json::json;

    #[test]
    fn base_url_comes_from_config() {
        let client = client(MockTransport::new());
        assert_eq!(client.base_url(), "https://vc.lab/rest");
        assert!(!client.connection().secure());
    }

    #[test]
    fn new_builds_reqwest_client() {
        let client = VcenterClient::new(&VsphereConfig::new("vc.lab", "a", "b")).unwrap();
        assert_eq!(client.base_url(), "https://vc.lab/rest");
    }

    #[tokio::test]
    async fn request_dispatches_custom_verb() {
        let transport = expect_one(
            |req| {
                req.verb == Verb::Patch
                    && req.url == "https://vc.lab/rest/vcenter/vm/vm-1/hardware/memory"
                    && req.body.as_deref() == Some(r#"{"spec":{"size_MiB":4096}}"#)
                    && req.headers.get("Content-Length") == Some("26")
            },
            "",
        );
        let env = client(transport)
            .request(
                TOKEN,
                Verb::Patch,
                "/vcenter/vm/vm-1/hardware/memory",
                json!({"spec": {"size_MiB": "4096"}}).as_object().cloned().unwrap_or_default(),
            )
            .await;
        assert!(env.success);
        assert_eq!(env.payload, serde_json::Value::Null);
    }

    #[tokio::test]
    async fn classifier_can_be_replaced() {
        let mut transport = MockTransport::new();
        transport.expect_execute().times(1).returning(|_| {
            Ok(RawResponse {
                status: 400,
                body: r#"{"type":"com.vmware.vapi.std.errors.invalid_argument"}"#.into(),
            })
        });
        let env = client(transport)
            .with_classifier(AnyVapiError)
            .get_clusters(TOKEN, None)
            .await;
        assert!(!env.success);
    }

    #[tokio::test]
    async fn headers_do_not_leak_between_calls() {
        let mut transport = MockTransport::new();
        let mut seq = mockall::Sequence::new();
        transport
            .expect_execute()
            .withf(|req| req.headers.contains("Authorization") && req.headers.len() == 5)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(RawResponse { status: 200, body: r#"{"value":"tok-a"}"#.into() }));
        transport
            .expect_execute()
            .withf(|req| {
                req.body.is_some() && req.headers.get("vmware-api-session-id") == Some("tok-a")
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(RawResponse { status: 200, body: r#"{"value":"vm-5"}"#.into() }));
        transport
            .expect_execute()
            .withf(|req| req.headers.lines() == ["vmware-api-session-id: tok-b".to_string()])
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(RawResponse { status: 200, body: r#"{"value":{}}"#.into() }));

        let client = client(transport);
        let session = client.create_session(Vec::<String>::new()).await;
        assert_eq!(session.value_str(), Some("tok-a"));

        let created = client
            .create_virtual_machine("tok-a", json!({"spec": {"name": "x"}}).as_object().cloned().unwrap_or_default())
            .await;
        assert!(created.success);

        let tools = client.get_vm_tools("tok-b", "vm-5").await;
        assert!(tools.success);
    }
}
