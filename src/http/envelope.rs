//! Uniform response envelope.
//!
//! Exactly one of `data`/`error` is present; `note` only when the
//! degraded retry supplied the result. `request` is a redacted URL
//! string on single-attempt success and `{primary, retry}` after a
//! degraded retry.

use serde::Serialize;
use serde_json::Value;

use crate::error::GatewayError;
use crate::registry::Operation;

/// JSON body of every gateway response.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub op: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    /// Successful response carrying translated upstream data.
    pub fn success(op: Operation, request: Value, data: Value, note: Option<String>) -> Self {
        Self {
            ok: true,
            op: Some(op.name().to_string()),
            request: Some(request),
            data: Some(data),
            note,
            error: None,
        }
    }

    /// Failed response; the error's display text is the whole story the
    /// caller gets (never a stack trace, never the credential).
    pub fn failure(error: &GatewayError) -> Self {
        Self {
            ok: false,
            op: None,
            request: None,
            data: None,
            note: None,
            error: Some(error.to_string()),
        }
    }
}
