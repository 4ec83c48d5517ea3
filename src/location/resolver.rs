//! Location reference resolution.
//!
//! # Responsibilities
//! - Turn a [`LocationReference`] into a [`GeoCoordinate`] or a typed failure
//! - Apply the start/end asymmetry: addresses are end-only, grid points start-only
//! - Geocode free-text addresses through the provider
//!
//! # Design Decisions
//! - Start and end resolution share the by-id and GPS branches
//! - An `{x, y}` point without a frame keeps the legacy behavior
//!   (building containment, then raw lat/lng fallback) and logs the fallback
//! - Empty addresses fail locally without a provider round trip

use std::fmt;
use std::sync::Arc;

use geo::Point;
use thiserror::Error;

use crate::location::directory::BuildingDirectory;
use crate::location::types::{CoordinateFrame, GeoCoordinate, LocationReference};
use crate::maps::{MapsClient, MapsError, STATUS_OK};

/// Which side of a route a reference describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::End => f.write_str("end"),
        }
    }
}

/// Why a reference could not be resolved.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no building with id {0}")]
    UnknownBuilding(i64),

    #[error("no building boundary contains ({x}, {y})")]
    NoBuildingAtPoint { x: f64, y: f64 },

    #[error("{kind} references are not accepted as a {endpoint} location")]
    UnsupportedReference { kind: &'static str, endpoint: Endpoint },

    #[error("coordinate components must be finite")]
    InvalidCoordinate,

    #[error("address is empty")]
    EmptyAddress,

    #[error("address not found (provider status {status})")]
    AddressNotFound { status: String },

    #[error("geocoding failed: {0}")]
    Provider(#[from] MapsError),
}

/// Resolves start and end references against the building directory and
/// the geocoding provider.
#[derive(Clone)]
pub struct LocationResolver {
    directory: Arc<dyn BuildingDirectory>,
    maps: MapsClient,
}

impl LocationResolver {
    pub fn new(directory: Arc<dyn BuildingDirectory>, maps: MapsClient) -> Self {
        Self { directory, maps }
    }

    /// Resolve the origin of a route.
    pub async fn resolve_start(&self, reference: &LocationReference) -> Result<GeoCoordinate, ResolveError> {
        match reference {
            LocationReference::ById(id) => self.building_coordinate(*id).await,
            LocationReference::ByGps { latitude, longitude } => gps(*latitude, *longitude),
            LocationReference::ByCoordinate { x, y, frame } => self.grid_point(*x, *y, *frame).await,
            LocationReference::ByAddress(_) => Err(ResolveError::UnsupportedReference {
                kind: reference.kind(),
                endpoint: Endpoint::Start,
            }),
        }
    }

    /// Resolve the destination of a route.
    pub async fn resolve_end(&self, reference: &LocationReference) -> Result<GeoCoordinate, ResolveError> {
        match reference {
            LocationReference::ById(id) => self.building_coordinate(*id).await,
            LocationReference::ByGps { latitude, longitude } => gps(*latitude, *longitude),
            LocationReference::ByAddress(address) => self.geocode_address(address).await,
            LocationReference::ByCoordinate { .. } => Err(ResolveError::UnsupportedReference {
                kind: reference.kind(),
                endpoint: Endpoint::End,
            }),
        }
    }

    /// Geocode a free-text address to the first result's location.
    pub async fn geocode_address(&self, address: &str) -> Result<GeoCoordinate, ResolveError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(ResolveError::EmptyAddress);
        }

        let response = self.maps.geocode(address).await?;
        if response.status != STATUS_OK {
            return Err(ResolveError::AddressNotFound { status: response.status });
        }

        let first = response.results.first().ok_or_else(|| ResolveError::AddressNotFound {
            status: response.status.clone(),
        })?;
        let location = &first.geometry.location;
        GeoCoordinate::new(location.lat, location.lng).ok_or(ResolveError::InvalidCoordinate)
    }

    async fn building_coordinate(&self, id: i64) -> Result<GeoCoordinate, ResolveError> {
        self.directory
            .find_by_id(id)
            .await
            .map(|place| place.coordinate)
            .ok_or(ResolveError::UnknownBuilding(id))
    }

    async fn grid_point(
        &self,
        x: f64,
        y: f64,
        frame: Option<CoordinateFrame>,
    ) -> Result<GeoCoordinate, ResolveError> {
        if frame == Some(CoordinateFrame::Gps) {
            return gps(x, y);
        }

        if let Some(place) = self.directory.find_containing(Point::new(x, y)).await {
            tracing::debug!(x, y, building = place.id, "Point resolved to containing building");
            return Ok(place.coordinate);
        }

        match frame {
            Some(CoordinateFrame::Floor) => Err(ResolveError::NoBuildingAtPoint { x, y }),
            _ => {
                tracing::warn!(x, y, "No building contains point; treating (x, y) as (latitude, longitude)");
                gps(x, y)
            }
        }
    }
}

fn gps(latitude: f64, longitude: f64) -> Result<GeoCoordinate, ResolveError> {
    GeoCoordinate::new(latitude, longitude).ok_or(ResolveError::InvalidCoordinate)
}
