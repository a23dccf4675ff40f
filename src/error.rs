//! Gateway error taxonomy.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that can occur while handling a gateway request.
///
/// Transport failures on the primary upstream attempt never surface here
/// directly; the fetcher consumes them and retries with a degraded query.
/// Only an exhausted retry becomes [`GatewayError::UpstreamExhausted`].
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The upstream credential is not configured.
    #[error("Missing ONBID_SERVICE_KEY")]
    MissingCredential,

    /// Requested operation is not in the allow-list.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Both the primary and the degraded upstream attempts failed.
    #[error("Upstream request timed out after degraded retry")]
    UpstreamExhausted,

    /// Upstream payload could not be translated to JSON.
    #[error("XML translation failed: {0}")]
    Translation(String),

    /// Any other fault in the pipeline.
    #[error("{0}")]
    Internal(String),
}

impl GatewayError {
    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::UnsupportedOperation(_) => StatusCode::BAD_REQUEST,
            GatewayError::UpstreamExhausted => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::MissingCredential
            | GatewayError::Translation(_)
            | GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
