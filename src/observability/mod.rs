//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured tracing events, request ID as a field)
//!     → metrics.rs (counters and histograms)
//!
//! Consumers:
//!     → stdout (fmt layer, filtered by RUST_LOG or config)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Internal error kinds are logged and counted even where the HTTP
//!   response collapses them into one message
//! - Request ID flows through all handler logs
//! - Metrics are cheap (atomic increments); a no-op recorder when disabled

pub mod logging;
pub mod metrics;
