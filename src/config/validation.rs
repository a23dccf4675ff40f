//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, row limit >= 1)
//! - Check addresses and base URLs parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - An empty credential is NOT an error; the handler reports it per
//!   request so the debug endpoint works on misconfigured deployments

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic configuration problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidBindAddress(String),
    InvalidMetricsAddress(String),
    InvalidBaseUrl { field: &'static str, reason: String },
    ZeroTimeout(&'static str),
    ZeroRowLimit,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "invalid bind address: {}", addr)
            }
            ValidationError::InvalidMetricsAddress(addr) => {
                write!(f, "invalid metrics address: {}", addr)
            }
            ValidationError::InvalidBaseUrl { field, reason } => {
                write!(f, "invalid {}: {}", field, reason)
            }
            ValidationError::ZeroTimeout(field) => write!(f, "{} must be greater than zero", field),
            ValidationError::ZeroRowLimit => {
                write!(f, "degraded_row_limit must be at least 1")
            }
        }
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    for (field, base) in [
        ("upstream.thing_base_url", &config.upstream.thing_base_url),
        ("upstream.code_base_url", &config.upstream.code_base_url),
    ] {
        if let Err(e) = Url::parse(base) {
            errors.push(ValidationError::InvalidBaseUrl {
                field,
                reason: e.to_string(),
            });
        }
    }

    for (field, value) in [
        ("upstream.primary_timeout_ms", config.upstream.primary_timeout_ms),
        ("upstream.retry_timeout_ms", config.upstream.retry_timeout_ms),
        ("timeouts.request_secs", config.timeouts.request_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(field));
        }
    }

    if config.upstream.degraded_row_limit == 0 {
        errors.push(ValidationError::ZeroRowLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
