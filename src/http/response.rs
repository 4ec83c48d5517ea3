//! JSON response bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::route::RouteCandidate;

/// Body of every failed route request.
pub const ROUTE_NOT_FOUND: &str = "Could not find route";
/// Live frame that could not be parsed.
pub const INVALID_REQUEST: &str = "Invalid request";
/// Live frame whose destination did not resolve.
pub const INVALID_DESTINATION: &str = "Invalid destination";

#[derive(Debug, Serialize)]
pub struct RoutesBody {
    pub routes: Vec<RouteCandidate>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { error: message.into() }
    }
}

/// Shorthand for `(status, {"error": message})`.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_shapes() {
        let routes = RoutesBody {
            routes: vec![RouteCandidate {
                distance: "5 km".to_string(),
                duration: "10 mins".to_string(),
                steps: vec![],
            }],
        };
        assert_eq!(
            serde_json::to_value(&routes).unwrap(),
            serde_json::json!({"routes": [{"distance": "5 km", "duration": "10 mins", "steps": []}]})
        );
        assert_eq!(
            serde_json::to_value(ErrorBody::new(ROUTE_NOT_FOUND)).unwrap(),
            serde_json::json!({"error": "Could not find route"})
        );
    }
}
