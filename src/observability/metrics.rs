//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): total requests by operation, status
//! - `gateway_request_duration_seconds` (histogram): latency distribution
//! - `gateway_degraded_retries_total` (counter): degraded retries issued
//!
//! # Design Decisions
//! - Labels carry the operation name and status code only; caller
//!   parameters are unbounded and never become labels

use std::net::SocketAddr;
use std::time::Instant;

use metrics::Label;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => {
            tracing::info!(address = %addr, "Metrics endpoint listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install Prometheus exporter");
        }
    }

    metrics::describe_counter!(
        "gateway_requests_total",
        "Total gateway requests by operation and status"
    );
    metrics::describe_histogram!(
        "gateway_request_duration_seconds",
        "Gateway request latency in seconds"
    );
    metrics::describe_counter!(
        "gateway_degraded_retries_total",
        "Degraded upstream retries issued by operation"
    );
}

/// Record one completed gateway request.
pub fn record_request(op: &str, status: u16, start: Instant) {
    let labels = vec![
        Label::new("op", op.to_string()),
        Label::new("status", status.to_string()),
    ];
    metrics::counter!("gateway_requests_total", labels.clone()).increment(1);
    metrics::histogram!("gateway_request_duration_seconds", labels)
        .record(start.elapsed().as_secs_f64());
}

/// Record one degraded retry.
pub fn record_degraded_retry(op: &str) {
    let labels = vec![Label::new("op", op.to_string())];
    metrics::counter!("gateway_degraded_retries_total", labels).increment(1);
}
