//! Operation registry subsystem.
//!
//! # Data Flow
//! ```text
//! caller-supplied operation name
//!     → operations.rs (allow-list gate)
//!     → Operation (strongly typed, guaranteed allow-listed)
//!     → Operation::service() (fixed op → service mapping)
//!     → Service base URL from configuration
//! ```
//!
//! # Design Decisions
//! - The allow-list is the authoritative gate; the service mapping is
//!   only consulted for operations that passed it
//! - Base URLs come from immutable configuration, never from caller input
//! - Pure lookup tables, no I/O

pub mod operations;

pub use operations::{Operation, Service};
