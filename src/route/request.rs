//! Inbound route request shapes for the HTTP and live channels.

use serde::Deserialize;

use crate::location::LocationReference;
use crate::maps::TravelMode;
use crate::route::error::RouteError;

/// Transport-independent route query.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuery {
    pub start: LocationReference,
    pub end: LocationReference,
    pub mode: TravelMode,
}

/// `POST /api/route/` body.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteRequest {
    pub start_location: LocationReference,
    pub end_location: LocationReference,
    pub mode: TravelMode,
}

/// One frame on the live route socket.
#[derive(Debug, Clone, Deserialize)]
pub struct LiveRouteUpdate {
    pub current_location: LocationReference,
    pub end_location: LocationReference,
    pub mode: TravelMode,
}

impl From<RouteRequest> for RouteQuery {
    fn from(request: RouteRequest) -> Self {
        Self {
            start: request.start_location,
            end: request.end_location,
            mode: request.mode,
        }
    }
}

impl From<LiveRouteUpdate> for RouteQuery {
    fn from(update: LiveRouteUpdate) -> Self {
        Self {
            start: update.current_location,
            end: update.end_location,
            mode: update.mode,
        }
    }
}

impl RouteQuery {
    /// Parse a `POST /api/route/` body.
    pub fn from_request_body(body: &[u8]) -> Result<Self, RouteError> {
        serde_json::from_slice::<RouteRequest>(body)
            .map(Self::from)
            .map_err(|e| RouteError::InvalidRequest(e.to_string()))
    }

    /// Parse a live update frame.
    pub fn from_live_frame(text: &str) -> Result<Self, RouteError> {
        serde_json::from_str::<LiveRouteUpdate>(text)
            .map(Self::from)
            .map_err(|e| RouteError::InvalidRequest(e.to_string()))
    }
}
