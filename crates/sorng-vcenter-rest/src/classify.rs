//! Response classification.
//!
//! vCenter reports most errors as JSON bodies of the shape
//! `{"type": "com.vmware.vapi.std.errors.<name>", "value": {...}}`. The
//! default classifier only treats `unauthenticated` as a failure; every other
//! decoded body, error-shaped or not, is returned as a success and left for
//! the caller to inspect.

use log::warn;
use serde_json::Value;

use crate::envelope::Envelope;

pub const VAPI_ERROR_PREFIX: &str = "com.vmware.vapi.std.errors.";
pub const UNAUTHENTICATED_TYPE: &str = "com.vmware.vapi.std.errors.unauthenticated";

/// Standard vAPI error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VapiErrorType {
    Unauthenticated,
    Unauthorized,
    NotFound,
    InvalidArgument,
    InvalidRequest,
    AlreadyExists,
    AlreadyInDesiredState,
    NotAllowedInCurrentState,
    ResourceBusy,
    ResourceInUse,
    ResourceInaccessible,
    ServiceUnavailable,
    TimedOut,
    Unsupported,
    InternalServerError,
    Error,
    /// A vAPI error name this crate does not know
    Other(String),
}

impl VapiErrorType {
    /// Parse a full `type` value; `None` if it is not a vAPI error type.
    pub fn parse(type_name: &str) -> Option<Self> {
        let name = type_name.strip_prefix(VAPI_ERROR_PREFIX)?;
        Some(match name {
            "unauthenticated" => Self::Unauthenticated,
            "unauthorized" => Self::Unauthorized,
            "not_found" => Self::NotFound,
            "invalid_argument" => Self::InvalidArgument,
            "invalid_request" => Self::InvalidRequest,
            "already_exists" => Self::AlreadyExists,
            "already_in_desired_state" => Self::AlreadyInDesiredState,
            "not_allowed_in_current_state" => Self::NotAllowedInCurrentState,
            "resource_busy" => Self::ResourceBusy,
            "resource_in_use" => Self::ResourceInUse,
            "resource_inaccessible" => Self::ResourceInaccessible,
            "service_unavailable" => Self::ServiceUnavailable,
            "timed_out" => Self::TimedOut,
            "unsupported" => Self::Unsupported,
            "internal_server_error" => Self::InternalServerError,
            "error" => Self::Error,
            other => Self::Other(other.to_string()),
        })
    }

    /// Read the `type` field of a decoded body.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        payload.get("type").and_then(Value::as_str).and_then(Self::parse)
    }
}

/// True when the body carries the unauthenticated sentinel.
pub fn is_unauthenticated(payload: &Value) -> bool {
    payload.get("type").and_then(Value::as_str) == Some(UNAUTHENTICATED_TYPE)
}

/// Decides whether a decoded response is a success or a failure.
pub trait ResponseClassifier: Send + Sync {
    fn classify(&self, status: u16, payload: Value) -> Envelope;
}

/// Fails only on the unauthenticated sentinel, whatever the HTTP status.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnauthenticatedOnly;

impl ResponseClassifier for UnauthenticatedOnly {
    fn classify(&self, status: u16, payload: Value) -> Envelope {
        if is_unauthenticated(&payload) {
            warn!("vCenter rejected the session (HTTP {status})");
            Envelope::failure(payload)
        } else {
            Envelope::success(payload)
        }
    }
}

/// Fails on any vAPI error body.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnyVapiError;

impl ResponseClassifier for AnyVapiError {
    fn classify(&self, status: u16, payload: Value) -> Envelope {
        match VapiErrorType::from_payload(&payload) {
            Some(kind) => {
                warn!("vCenter returned {kind:?} (HTTP {status})");
                Envelope::failure(payload)
            }
            None => Envelope::success(payload),
        }
    }
}
