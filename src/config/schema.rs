//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! gateway. All types derive Serde traits for deserialization from
//! config files; the credential and the serving region come from
//! environment overrides applied by the loader.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream endpoint, credential and retry policy.
    pub upstream: UpstreamConfig,

    /// Timeout configuration for inbound requests.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Serving region identifier, surfaced in debug payloads.
    /// Not required for correctness.
    pub region: Option<String>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream endpoint and degraded-retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Credential sent as `serviceKey` on every upstream call.
    /// Overridden by the `ONBID_SERVICE_KEY` environment variable.
    /// Empty means unconfigured; the handler answers 500 per request.
    pub service_key: String,

    /// Base URL of the asset information inquiry service.
    pub thing_base_url: String,

    /// Base URL of the code table inquiry service.
    pub code_base_url: String,

    /// Timeout for the primary upstream attempt in milliseconds.
    pub primary_timeout_ms: u64,

    /// Timeout for the degraded retry attempt in milliseconds.
    pub retry_timeout_ms: u64,

    /// Row-count ceiling applied to the degraded retry.
    pub degraded_row_limit: u32,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            service_key: String::new(),
            thing_base_url: "http://openapi.onbid.co.kr/openapi/services/ThingInfoInquireSvc"
                .to_string(),
            code_base_url: "http://openapi.onbid.co.kr/openapi/services/OnbidCodeInfoInquireSvc"
                .to_string(),
            primary_timeout_ms: 6_000,
            retry_timeout_ms: 3_000,
            degraded_row_limit: 10,
        }
    }
}

/// Timeout configuration for inbound handling.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total inbound request timeout in seconds. Must exceed the sum of
    /// both upstream attempt budgets.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
