//! Building details for map popups: reverse geocode, then Place Details.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::location::directory::BuildingDirectory;
use crate::maps::{MapsClient, MapsError, STATUS_OK};

/// Place Details fields requested from the provider.
pub const DETAIL_FIELDS: &[&str] = &[
    "formatted_phone_number",
    "website",
    "rating",
    "opening_hours",
    "types",
];

/// What the popup shows for a building.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceInfo {
    pub name: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub opening_hours: Vec<String>,
    pub types: Vec<String>,
}

#[derive(Debug, Error)]
pub enum PlaceInfoError {
    #[error("no building with id {0}")]
    UnknownBuilding(i64),

    #[error("no place found for building (provider status {status})")]
    NoPlaceFound { status: String },

    #[error("place lookup failed: {0}")]
    Provider(#[from] MapsError),
}

#[derive(Clone)]
pub struct PlaceInfoService {
    directory: Arc<dyn BuildingDirectory>,
    maps: MapsClient,
}

impl PlaceInfoService {
    pub fn new(directory: Arc<dyn BuildingDirectory>, maps: MapsClient) -> Self {
        Self { directory, maps }
    }

    pub async fn place_info(&self, building_id: i64) -> Result<PlaceInfo, PlaceInfoError> {
        let place = self
            .directory
            .find_by_id(building_id)
            .await
            .ok_or(PlaceInfoError::UnknownBuilding(building_id))?;

        let geocoded = self.maps.reverse_geocode(place.coordinate).await?;
        // Only the top reverse-geocode hit counts, even if it lacks a place id.
        let place_id = geocoded
            .results
            .first()
            .and_then(|top| top.place_id.clone())
            .filter(|_| geocoded.status == STATUS_OK)
            .ok_or_else(|| PlaceInfoError::NoPlaceFound { status: geocoded.status.clone() })?;

        let details = self.maps.place_details(&place_id, DETAIL_FIELDS).await?;
        if details.status != STATUS_OK {
            return Err(PlaceInfoError::NoPlaceFound { status: details.status });
        }

        tracing::debug!(building = building_id, %place_id, "Place details fetched");
        let result = details.result;
        Ok(PlaceInfo {
            name: place.long_name_or_name(),
            phone: result.formatted_phone_number,
            website: result.website,
            rating: result.rating,
            opening_hours: result.opening_hours.map(|h| h.weekday_text).unwrap_or_default(),
            types: result.types,
        })
    }
}
