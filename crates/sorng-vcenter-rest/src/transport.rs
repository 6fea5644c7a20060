//! HTTP transport seam.
//!
//! The dispatcher hands a fully prepared request (URL, header lines, body) to
//! a [`Transport`] and gets back the status and raw body text. The production
//! implementation is [`ReqwestTransport`]; tests substitute their own.

use async_trait::async_trait;
use log::{info, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Proxy};

use crate::error::{VmwareError, VmwareResult};
use crate::headers::HeaderSet;
use crate::types::{ConnectionConfig, Verb};

/// A request ready to go on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub verb: Verb,
    pub url: String,
    pub headers: HeaderSet,
    pub body: Option<String>,
}

/// Status and body text of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Executes exactly one HTTP exchange.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &PreparedRequest) -> VmwareResult<RawResponse>;
}

/// `reqwest`-backed transport.
///
/// HTTP/1.1 only, gzip / deflate / br decoding, proxy applied from the
/// connection config (empty means no proxy at all, environment proxies
/// included), certificate and host name checks skipped unless `secure`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &ConnectionConfig) -> VmwareResult<Self> {
        let builder = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.timeout())
            .http1_only()
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .danger_accept_invalid_certs(!config.secure());

        let builder = if config.proxy().is_empty() {
            builder.no_proxy()
        } else {
            let proxy = Proxy::all(config.proxy())
                .map_err(|e| VmwareError::request(format!("Invalid proxy: {e}")))?;
            builder.proxy(proxy)
        };

        let client = builder
            .build()
            .map_err(|e| VmwareError::connection(format!("Failed to build HTTP client: {e}")))?;

        info!(
            "vCenter REST transport ready for {} (secure={}, proxy={})",
            config.base_url(),
            config.secure(),
            if config.proxy().is_empty() { "none" } else { config.proxy() }
        );

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &PreparedRequest) -> VmwareResult<RawResponse> {
        let mut builder = self
            .client
            .request(method(request.verb), &request.url)
            .headers(header_map(&request.headers)?);
        if let Some(ref body) = request.body {
            builder = builder.body(body.clone());
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(RawResponse { status, body })
    }
}

fn method(verb: Verb) -> Method {
    match verb {
        Verb::Get => Method::GET,
        Verb::Post => Method::POST,
        Verb::Put => Method::PUT,
        Verb::Patch => Method::PATCH,
        Verb::Delete => Method::DELETE,
    }
}

/// Typed headers from the raw lines; duplicates are kept. Malformed lines
/// are dropped with a warning.
pub fn header_map(headers: &HeaderSet) -> VmwareResult<HeaderMap> {
    for line in headers.malformed() {
        warn!("Dropping malformed header line: {line:?}");
    }
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers.entries() {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| VmwareError::request(format!("Invalid header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| VmwareError::request(format!("Invalid value for header {name}: {e}")))?;
        map.append(name, value);
    }
    Ok(map)
}
