//! Gateway request handler.
//!
//! # Responsibilities
//! - Short-circuit debug pings before touching configuration
//! - Drive the pipeline: validate config → normalize → build request
//!   → fetch (with degraded retry) → translate → respond
//! - Map every error kind to its HTTP status and the uniform envelope
//!
//! # Design Decisions
//! - Every state has an error edge straight to the envelope; nothing
//!   upstream-facing runs after a failure
//! - URLs are redacted before they reach a log event or a response

use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Map, Value};

use crate::error::GatewayResult;
use crate::http::envelope::Envelope;
use crate::http::request::X_REQUEST_ID;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::query::{self, PING_KEY};
use crate::registry::Operation;
use crate::translate;
use crate::upstream::UpstreamRequest;

/// Note attached when the degraded retry supplied the result.
const DEGRADED_NOTE: &str =
    "Primary upstream attempt timed out; retried result with a reduced query";

/// Main gateway handler for `GET /api/onbid/proxy`.
pub async fn proxy_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(raw): Query<Vec<(String, String)>>,
) -> Response {
    let start = Instant::now();
    let request_id = headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    // Debug liveness probe: no upstream contact, no credential needed.
    if raw.iter().any(|(k, _)| k == PING_KEY) {
        tracing::debug!(request_id = %request_id, "Debug ping short-circuit");
        metrics::record_request("ping", StatusCode::OK.as_u16(), start);
        return (StatusCode::OK, Json(ping_payload(&state, &raw))).into_response();
    }

    match run_pipeline(&state, &raw, &request_id).await {
        Ok((op, envelope)) => {
            tracing::info!(
                request_id = %request_id,
                op = %op,
                degraded = envelope.note.is_some(),
                "Request served"
            );
            metrics::record_request(op.name(), StatusCode::OK.as_u16(), start);
            (StatusCode::OK, Json(envelope)).into_response()
        }
        Err(err) => {
            let status = err.status();
            tracing::warn!(
                request_id = %request_id,
                status = %status,
                error = %err,
                "Request failed"
            );
            metrics::record_request("none", status.as_u16(), start);
            (status, Json(Envelope::failure(&err))).into_response()
        }
    }
}

/// The pipeline proper; every `?` is an edge to `Respond(error)`.
async fn run_pipeline(
    state: &AppState,
    raw: &[(String, String)],
    request_id: &str,
) -> GatewayResult<(Operation, Envelope)> {
    // ValidateConfig
    let credential = state.config.upstream.service_key.as_str();
    if credential.is_empty() {
        return Err(crate::error::GatewayError::MissingCredential);
    }

    // Normalize (the allow-list gate lives inside)
    let normalized = query::normalize(raw)?;
    let op = normalized.op;

    // BuildRequest
    let base = op.service().base_url(&state.config.upstream);
    let request = UpstreamRequest::build(base, op, &normalized.params, credential)?;

    tracing::debug!(
        request_id = %request_id,
        op = %op,
        url = %request.redacted(),
        "Proxying request upstream"
    );

    // Fetch (degraded retry inside the fetcher)
    let outcome = state.fetcher.fetch(&request).await?;

    // Translate
    let data = translate::to_json(&outcome.xml)?;

    // Respond
    let envelope = match outcome.retried {
        Some(retry) => Envelope::success(
            op,
            serde_json::json!({
                "primary": request.redacted(),
                "retry": retry.redacted(),
            }),
            data,
            Some(DEGRADED_NOTE.to_string()),
        ),
        None => Envelope::success(
            op,
            Value::String(request.redacted().to_string()),
            data,
            None,
        ),
    };

    Ok((op, envelope))
}

/// Fixed liveness payload echoing the received parameters.
fn ping_payload(state: &AppState, raw: &[(String, String)]) -> Value {
    let mut params = Map::new();
    for (key, value) in raw {
        params.insert(key.clone(), Value::String(value.clone()));
    }

    serde_json::json!({
        "ok": true,
        "ping": "pong",
        "region": state.config.region,
        "params": params,
    })
}
