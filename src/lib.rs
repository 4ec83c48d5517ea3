//! Campus routing service library.
//!
//! Resolves building IDs, GPS points, floor-plan coordinates and street
//! addresses to coordinates, then asks Google Directions for candidate
//! routes. Served over HTTP and a live WebSocket channel.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod location;
pub mod maps;
pub mod observability;
pub mod resilience;
pub mod route;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
