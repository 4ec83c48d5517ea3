//! Google Maps Platform integration.
//!
//! # Data Flow
//! ```text
//! resolver / aggregator / place info
//!     → client.rs (URL + key, deadline, retry, decode)
//!     → types.rs (typed payloads with provider status left intact)
//! ```
//!
//! # Design Decisions
//! - One pooled `reqwest::Client` shared by every request
//! - The API key never appears in logs or error messages
//! - Interpreting provider statuses is the caller's job

pub mod client;
pub mod types;

pub use client::{MapsClient, MapsError};
pub use types::{TravelMode, STATUS_OK};
