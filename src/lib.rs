//! Onbid XML to JSON Gateway Library

pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod query;
pub mod registry;
pub mod translate;
pub mod upstream;

pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use http::HttpServer;
