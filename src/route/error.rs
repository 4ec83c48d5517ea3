use thiserror::Error;

use crate::location::{Endpoint, ResolveError};
use crate::maps::MapsError;

/// Why a route request produced no routes.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A reference could not be turned into a coordinate.
    #[error("{endpoint} location unresolved: {source}")]
    LocationUnresolved {
        endpoint: Endpoint,
        #[source]
        source: ResolveError,
    },

    /// The directions provider could not be reached or answered garbage.
    #[error("directions transport failure: {0}")]
    Transport(#[source] MapsError),

    /// The provider answered, but with no usable route.
    #[error("no route found (provider status {status})")]
    NoRouteFound { status: String },

    /// The request itself was malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl RouteError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RouteError::LocationUnresolved { .. } => "location_unresolved",
            RouteError::Transport(_) => "transport",
            RouteError::NoRouteFound { .. } => "no_route_found",
            RouteError::InvalidRequest(_) => "invalid_request",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        let unresolved = RouteError::LocationUnresolved {
            endpoint: Endpoint::End,
            source: ResolveError::UnknownBuilding(999),
        };
        assert_eq!(unresolved.kind(), "location_unresolved");
        assert_eq!(unresolved.to_string(), "end location unresolved: no building with id 999");

        let none = RouteError::NoRouteFound { status: "ZERO_RESULTS".to_string() };
        assert_eq!(none.kind(), "no_route_found");
        assert_eq!(RouteError::Transport(MapsError::Http(500)).kind(), "transport");
    }
}
