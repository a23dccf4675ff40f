//! Query normalization subsystem.
//!
//! # Data Flow
//! ```text
//! inbound query pairs (ordered, possibly duplicated)
//!     → normalizer.rs (resolve operation, strip reserved keys)
//!     → NormalizedQuery { op, params }
//!     → upstream request builder
//! ```
//!
//! # Design Decisions
//! - Parameter keys are opaque pass-through except the reserved
//!   selector, debug and credential keys
//! - Caller order is preserved; empty values are dropped
//! - The default-operation heuristic keeps callers unaware of the
//!   upstream's endpoint split between "all new" and "filtered" listings

pub mod normalizer;

pub use normalizer::{
    normalize, NormalizedQuery, CREDENTIAL_KEY, NAME_FILTER_KEY, OP_KEY, PING_KEY, ROW_COUNT_KEY,
};
