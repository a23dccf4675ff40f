//! Onbid XML to JSON Gateway
//!
//! A stateless proxy for the Onbid open-data API built with Tokio and
//! Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌────────────────────────────────────────────────────┐
//!                     │                     GATEWAY                        │
//!                     │                                                    │
//!  GET /api/onbid/…   │  ┌─────────┐   ┌───────────┐   ┌───────────────┐   │
//!  ───────────────────┼─▶│  http   │──▶│   query   │──▶│   registry    │   │
//!                     │  │ handler │   │normalizer │   │  (allow-list) │   │
//!                     │  └─────────┘   └───────────┘   └──────┬────────┘   │
//!                     │                                       │            │
//!                     │                                       ▼            │
//!                     │                               ┌───────────────┐    │
//!                     │                               │   upstream    │    │     Onbid
//!                     │                               │ build + fetch │────┼──▶  open-data
//!                     │                               │ (degraded     │    │     API (XML)
//!                     │                               │  retry)       │    │
//!                     │                               └──────┬────────┘    │
//!  JSON envelope      │  ┌─────────┐   ┌───────────┐         │             │
//!  ◀──────────────────┼──│envelope │◀──│ translate │◀────────┘             │
//!                     │  │ + CORS  │   │ XML→JSON  │                       │
//!                     │  └─────────┘   └───────────┘                       │
//!                     │                                                    │
//!                     │  ┌──────────────────────────────────────────────┐  │
//!                     │  │            Cross-Cutting Concerns            │  │
//!                     │  │  ┌─────────┐  ┌─────────────┐  ┌──────────┐  │  │
//!                     │  │  │ config  │  │observability│  │request ID│  │  │
//!                     │  │  └─────────┘  └─────────────┘  └──────────┘  │  │
//!                     │  └──────────────────────────────────────────────┘  │
//!                     └────────────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod registry;
pub mod translate;
pub mod upstream;

// Cross-cutting concerns
pub mod observability;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "onbid_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("onbid-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    // Load configuration (TOML file optional, env overrides)
    let config = config::loader::load_from_env()?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        credential_configured = !config.upstream.service_key.is_empty(),
        primary_timeout_ms = config.upstream.primary_timeout_ms,
        retry_timeout_ms = config.upstream.retry_timeout_ms,
        degraded_row_limit = config.upstream.degraded_row_limit,
        region = config.region.as_deref().unwrap_or("unset"),
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Initialize metrics server
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            crate::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Create and run HTTP server
    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
