//! The uniform result returned by every public operation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classify::VapiErrorType;
use crate::error::{VmwareError, VmwareErrorKind, VmwareResult};

/// `{success, payload}` plus a fault block when the call never produced a
/// decodable vendor response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    pub payload: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault: Option<Fault>,
}

/// Details of a transport or decoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fault {
    /// HTTP status if one was seen, otherwise 0
    pub code: u16,
    pub kind: String,
    pub message: String,
    pub trace: String,
    /// Local time, `%Y-%m-%d %H:%M:%S`
    pub timestamp: String,
}

impl Envelope {
    pub fn success(payload: Value) -> Self {
        Self {
            success: true,
            payload,
            fault: None,
        }
    }

    pub fn failure(payload: Value) -> Self {
        Self {
            success: false,
            payload,
            fault: None,
        }
    }

    /// Local precondition failures carry only their message; everything else
    /// also gets a fault block.
    pub fn from_error(err: &VmwareError) -> Self {
        let payload = Value::String(err.message.clone());
        if err.kind == VmwareErrorKind::InvalidArgument {
            return Self::failure(payload);
        }
        Self {
            success: false,
            payload,
            fault: Some(Fault {
                code: err.code(),
                kind: err.kind.as_str().to_string(),
                message: err.message.clone(),
                trace: err.trace(),
                timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            }),
        }
    }

    /// Collapse an internal result into an envelope.
    pub fn from_result(result: VmwareResult<Envelope>) -> Self {
        result.unwrap_or_else(|err| Self::from_error(&err))
    }

    /// The vendor's `value` wrapper, if present.
    pub fn value(&self) -> Option<&Value> {
        self.payload.get("value")
    }

    /// `value` as a string, e.g. the token returned by session creation.
    pub fn value_str(&self) -> Option<&str> {
        self.value().and_then(Value::as_str)
    }

    /// The vendor error type of the payload, if the payload is error-shaped.
    /// Useful for inspecting passthrough errors on successful envelopes.
    pub fn vapi_error(&self) -> Option<VapiErrorType> {
        VapiErrorType::from_payload(&self.payload)
    }
}
