//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Call to an external provider:
//!     → timeouts.rs (enforce a deadline on every attempt)
//!     → On transient failure: retries.rs (bounded retry with backoff.rs delays)
//!     → Final outcome returned to the caller untouched
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - Only transport-level failures are retried; provider statuses never are
//! - Attempts are bounded by configuration

pub mod backoff;
pub mod retries;
pub mod timeouts;

pub use retries::{retry_transient, Transient};
pub use timeouts::{with_deadline, DeadlineExceeded};
