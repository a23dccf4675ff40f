//! Upstream request subsystem.
//!
//! # Data Flow
//! ```text
//! NormalizedQuery
//!     → request.rs (compose URL, credential first, redacted echo)
//!     → fetcher.rs (primary attempt under timeout)
//!     → on transport failure: request.degraded() (fewer rows, no
//!       free-text filter), one retry under a second timeout
//!     → XML body + which attempt produced it
//! ```
//!
//! # Design Decisions
//! - Requests are immutable once built; the degraded retry is a second
//!   instance derived from the first
//! - Timeouts cancel the in-flight call so the retry never contends
//!   with an abandoned socket
//! - Never a third attempt

pub mod fetcher;
pub mod request;

pub use fetcher::{FetchOutcome, Fetcher};
pub use request::UpstreamRequest;
