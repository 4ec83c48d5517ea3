//! Route planning.
//!
//! # Data Flow
//! ```text
//! RouteRequest / LiveRouteUpdate → RouteQuery
//!     → planner.rs (resolve start and end concurrently)
//!     → aggregator.rs (one directions call, first leg per route)
//!     → Vec<RouteCandidate>
//! ```

pub mod aggregator;
pub mod error;
pub mod planner;
pub mod request;

pub use aggregator::{RouteAggregator, RouteCandidate};
pub use error::RouteError;
pub use planner::RoutePlanner;
pub use request::{LiveRouteUpdate, RouteQuery, RouteRequest};
