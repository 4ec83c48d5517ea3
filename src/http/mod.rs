//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID)
//!     → route.rs / websocket.rs / buildings.rs (handlers)
//!     → response.rs (JSON bodies)
//!     → Send to client
//! ```

pub mod buildings;
pub mod request;
pub mod response;
pub mod route;
pub mod server;
pub mod websocket;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
