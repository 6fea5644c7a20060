//! Error types for the vCenter REST client.
//!
//! Errors never reach the caller of a resource operation directly: the
//! dispatcher folds them into an [`Envelope`](crate::envelope::Envelope).
//! They exist so the internal plumbing can use `?`.

use std::error::Error as StdError;

use thiserror::Error;

/// Categorised error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmwareErrorKind {
    /// vCenter unreachable (DNS, refused connection, proxy failure)
    ConnectionError,
    /// TLS handshake / certificate verification failed
    TlsError,
    /// Caller supplied a value outside a closed vocabulary
    InvalidArgument,
    /// Request could not be built (bad header line, bad proxy URL)
    RequestError,
    /// Connect or overall timeout elapsed
    Timeout,
    /// Response body was not valid JSON
    ParseError,
    /// Generic
    Other,
}

impl VmwareErrorKind {
    /// Stable snake_case name, used in fault envelopes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConnectionError => "connection_error",
            Self::TlsError => "tls_error",
            Self::InvalidArgument => "invalid_argument",
            Self::RequestError => "request_error",
            Self::Timeout => "timeout",
            Self::ParseError => "parse_error",
            Self::Other => "other",
        }
    }
}

/// Crate error type carrying a kind + human-readable message.
#[derive(Debug, Clone, Error)]
#[error("[{kind:?}] {message}")]
pub struct VmwareError {
    pub kind: VmwareErrorKind,
    pub message: String,
    /// HTTP status seen by the transport, if any.
    pub status: Option<u16>,
    /// Rendered `source()` chain of the underlying fault, outermost first.
    pub causes: Vec<String>,
}

impl VmwareError {
    pub fn new(kind: VmwareErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            message: msg.into(),
            status: None,
            causes: Vec::new(),
        }
    }

    pub fn connection(msg: impl Into<String>) -> Self {
        Self::new(VmwareErrorKind::ConnectionError, msg)
    }

    pub fn request(msg: impl Into<String>) -> Self {
        Self::new(VmwareErrorKind::RequestError, msg)
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::new(VmwareErrorKind::ParseError, msg)
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::new(VmwareErrorKind::Timeout, msg)
    }

    /// Rejection of a value outside `accepted`. The message lists the
    /// accepted values as a JSON array, in catalog order.
    pub fn invalid_option(accepted: &[&str]) -> Self {
        let listed = serde_json::to_string(accepted).unwrap_or_default();
        Self::new(
            VmwareErrorKind::InvalidArgument,
            format!("Invalid request. Valid Options: {listed}"),
        )
    }

    fn with_cause(mut self, err: &(dyn StdError + 'static)) -> Self {
        self.causes = cause_chain(err);
        self
    }

    /// Numeric code for fault envelopes: the HTTP status when one was
    /// observed, otherwise 0.
    pub fn code(&self) -> u16 {
        self.status.unwrap_or(0)
    }

    /// Numbered trace lines: the error itself first, then each cause.
    pub fn trace(&self) -> String {
        std::iter::once(self.message.as_str())
            .chain(self.causes.iter().map(String::as_str))
            .enumerate()
            .map(|(i, line)| format!("#{i} {line}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn cause_chain(err: &(dyn StdError + 'static)) -> Vec<String> {
    let mut causes = Vec::new();
    let mut current = err.source();
    while let Some(cause) = current {
        causes.push(cause.to_string());
        current = cause.source();
    }
    causes
}

/// Whether a `rustls::Error` sits anywhere in the chain, either directly or
/// inside an `io::Error` (whose `source()` skips the wrapped error).
fn is_tls_failure(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.is::<rustls::Error>() {
            return true;
        }
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if io.get_ref().is_some_and(|inner| inner.is::<rustls::Error>()) {
                return true;
            }
        }
        current = e.source();
    }
    false
}

/// Text fallback for connectors that flatten the TLS error into a message.
/// Best-effort only.
fn mentions_tls(causes: &[String]) -> bool {
    causes.iter().any(|c| {
        let c = c.to_ascii_lowercase();
        c.contains("certificate") || c.contains("tls") || c.contains("handshake")
    })
}

impl From<reqwest::Error> for VmwareError {
    fn from(e: reqwest::Error) -> Self {
        let causes = cause_chain(&e);
        let mut err = if e.is_timeout() {
            Self::timeout(format!("HTTP timeout: {e}"))
        } else if e.is_connect() && (is_tls_failure(&e) || mentions_tls(&causes)) {
            Self::new(VmwareErrorKind::TlsError, format!("TLS failure: {e}"))
        } else if e.is_connect() {
            Self::connection(format!("Connection failed: {e}"))
        } else if e.is_builder() {
            Self::request(format!("Invalid request: {e}"))
        } else if e.is_decode() || e.is_body() {
            Self::parse(format!("Failed to read response body: {e}"))
        } else {
            Self::new(VmwareErrorKind::Other, format!("HTTP error: {e}"))
        };
        err.status = e.status().map(|s| s.as_u16());
        err.causes = causes;
        err
    }
}

impl From<serde_json::Error> for VmwareError {
    fn from(e: serde_json::Error) -> Self {
        Self::parse(format!("JSON parse error: {e}")).with_cause(&e)
    }
}

/// Convenience alias.
pub type VmwareResult<T> = Result<T, VmwareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_option_lists_values_as_json() {
        let err = VmwareError::invalid_option(&["sata", "scsi"]);
        assert_eq!(err.kind, VmwareErrorKind::InvalidArgument);
        assert_eq!(err.message, r#"Invalid request. Valid Options: ["sata","scsi"]"#);
    }

    #[test]
    fn trace_numbers_message_then_causes() {
        let mut err = VmwareError::connection("Connection failed");
        err.causes = vec!["tcp connect error".into(), "refused".into()];
        assert_eq!(
            err.trace(),
            "#0 Connection failed\n#1 tcp connect error\n#2 refused"
        );
    }

    #[test]
    fn trace_is_never_empty() {
        assert_eq!(VmwareError::timeout("slow").trace(), "#0 slow");
    }

    #[test]
    fn code_defaults_to_zero() {
        let mut err = VmwareError::parse("bad");
        assert_eq!(err.code(), 0);
        err.status = Some(502);
        assert_eq!(err.code(), 502);
    }

    #[test]
    fn serde_json_errors_become_parse_errors() {
        let e = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let err = VmwareError::from(e);
        assert_eq!(err.kind, VmwareErrorKind::ParseError);
        assert!(err.message.starts_with("JSON parse error"));
    }

    #[test]
    fn display_includes_kind() {
        let err = VmwareError::timeout("Read timed out");
        assert_eq!(err.to_string(), "[Timeout] Read timed out");
    }

    #[test]
    fn rustls_error_inside_io_error_is_tls() {
        let rustls_err = rustls::Error::InvalidCertificate(rustls::CertificateError::UnknownIssuer);
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, rustls_err);
        assert!(is_tls_failure(&io));
    }

    #[test]
    fn plain_io_error_is_not_tls() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(!is_tls_failure(&io));
        assert!(!mentions_tls(&["tcp connect error".into(), "refused".into()]));
    }

    #[test]
    fn kind_names_are_snake_case() {
        assert_eq!(VmwareErrorKind::TlsError.as_str(), "tls_error");
        assert_eq!(VmwareErrorKind::InvalidArgument.as_str(), "invalid_argument");
    }
}
