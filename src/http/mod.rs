//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! GET /api/onbid/proxy?...
//!     → server.rs (Axum setup, CORS, request ID, trace layers)
//!     → handler.rs (ping short-circuit, then the pipeline:
//!       validate config → normalize → build → fetch → translate)
//!     → envelope.rs (uniform {ok, op, request, data, note, error})
//!     → Send to client
//! ```

pub mod envelope;
pub mod handler;
pub mod request;
pub mod server;

pub use envelope::Envelope;
pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
