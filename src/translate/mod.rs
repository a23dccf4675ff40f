//! XML to JSON translation subsystem.
//!
//! # Data Flow
//! ```text
//! upstream XML text
//!     → fold.rs (event reader, recursive fold)
//!     → serde_json::Value mirroring the upstream document
//! ```
//!
//! # Design Decisions
//! - Folding rules match what downstream consumers already parse:
//!   repeated siblings become arrays, single elements stay scalar
//! - Empty input folds to null rather than an error
//! - Malformed XML is a translation error, surfaced as 500

pub mod fold;

pub use fold::to_json;
