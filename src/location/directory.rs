//! Building lookup and the campus GeoJSON loader.
//!
//! # Responsibilities
//! - Define the lookup seam the resolver depends on ([`BuildingDirectory`])
//! - Join building info points with boundary polygons by `id`
//! - Answer primary-key and boundary-containment queries
//!
//! # Design Decisions
//! - Loaded once at startup, immutable afterwards (shared via `Arc`, no locks)
//! - Containment is a linear scan in ascending id order; a campus holds
//!   at most a few hundred buildings
//! - Malformed features are skipped with a warning; unreadable files are fatal

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use geo::{Coord, LineString, MultiPolygon, Point, Polygon};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::CampusConfig;
use crate::location::types::{GeoCoordinate, IndoorGrid, Place};

/// Lookup operations over stored buildings.
#[async_trait]
pub trait BuildingDirectory: Send + Sync {
    /// Building with the given primary key.
    async fn find_by_id(&self, id: i64) -> Option<Place>;

    /// First building whose boundary contains `point` (x = lon, y = lat).
    async fn find_containing(&self, point: Point<f64>) -> Option<Place>;
}

/// Errors raised while loading campus data.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid GeoJSON in {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// In-memory building index built from the campus GeoJSON files.
#[derive(Debug, Clone, Default)]
pub struct CampusDirectory {
    places: BTreeMap<i64, Place>,
}

impl CampusDirectory {
    /// Read both files named in the campus configuration.
    pub fn load(config: &CampusConfig) -> Result<Self, DirectoryError> {
        let info = read(&config.buildings_path)?;
        let boundaries = read(&config.boundaries_path)?;
        let directory = Self::from_geojson(&info, &boundaries)?;

        tracing::info!(
            buildings = directory.len(),
            with_boundary = directory.places.values().filter(|p| p.boundary.is_some()).count(),
            "Campus directory loaded"
        );
        Ok(directory)
    }

    /// Parse a building-info collection and a boundary collection.
    pub fn from_geojson(info: &str, boundaries: &str) -> Result<Self, DirectoryError> {
        let info: FeatureCollection = serde_json::from_str(info)
            .map_err(|source| DirectoryError::Parse { what: "building info", source })?;
        let boundaries: FeatureCollection = serde_json::from_str(boundaries)
            .map_err(|source| DirectoryError::Parse { what: "building boundaries", source })?;

        let boundary_index = index_boundaries(boundaries);
        let mut places = BTreeMap::new();

        for feature in info.features {
            let props = feature.properties.unwrap_or_default();
            let Some(id) = feature_id(&props) else {
                tracing::warn!("Skipping building feature without an id");
                continue;
            };

            let Some(coordinate) = feature.geometry.as_ref().and_then(Geometry::as_point) else {
                tracing::warn!(id, "Skipping building without a Point geometry");
                continue;
            };

            let boundary = boundary_index.get(&id).cloned();
            if boundary.is_none() {
                tracing::warn!(id, "Building has no matching boundary; containment lookups will skip it");
            }

            let place = Place {
                id,
                name: text(&props, "Building"),
                long_name: text(&props, "Building Long Name"),
                address: text(&props, "Address"),
                campus: text(&props, "Campus"),
                coordinate,
                boundary,
                indoor: props
                    .get("Floors")
                    .and_then(Value::as_u64)
                    .and_then(|floors| u32::try_from(floors).ok())
                    .map(|floors| IndoorGrid { floors }),
            };
            places.insert(id, place);
        }

        Ok(Self { places })
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

#[async_trait]
impl BuildingDirectory for CampusDirectory {
    async fn find_by_id(&self, id: i64) -> Option<Place> {
        self.places.get(&id).cloned()
    }

    async fn find_containing(&self, point: Point<f64>) -> Option<Place> {
        self.places.values().find(|p| p.contains(&point)).cloned()
    }
}

fn read(path: &str) -> Result<String, DirectoryError> {
    fs::read_to_string(Path::new(path)).map_err(|source| DirectoryError::Io {
        path: path.to_string(),
        source,
    })
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    geometry: Option<Geometry>,
}

type Position = Vec<f64>;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Point { coordinates: Position },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    #[serde(other)]
    Unsupported,
}

impl Geometry {
    /// GeoJSON points are `[lon, lat]`.
    fn as_point(&self) -> Option<GeoCoordinate> {
        match self {
            Geometry::Point { coordinates } if coordinates.len() >= 2 => {
                GeoCoordinate::new(coordinates[1], coordinates[0])
            }
            _ => None,
        }
    }

    /// Polygons are promoted to single-member MultiPolygons.
    fn into_multi_polygon(self) -> Option<MultiPolygon<f64>> {
        match self {
            Geometry::Polygon { coordinates } => Some(MultiPolygon::new(vec![polygon(coordinates)?])),
            Geometry::MultiPolygon { coordinates } => coordinates
                .into_iter()
                .map(polygon)
                .collect::<Option<Vec<_>>>()
                .map(MultiPolygon::new),
            _ => None,
        }
    }
}

fn polygon(rings: Vec<Vec<Position>>) -> Option<Polygon<f64>> {
    let mut rings = rings.into_iter().map(ring);
    let exterior = rings.next()??;
    let interiors = rings.collect::<Option<Vec<_>>>()?;
    Some(Polygon::new(exterior, interiors))
}

fn ring(positions: Vec<Position>) -> Option<LineString<f64>> {
    positions
        .into_iter()
        .map(|p| (p.len() >= 2).then(|| Coord { x: p[0], y: p[1] }))
        .collect::<Option<Vec<_>>>()
        .map(LineString::new)
}

fn index_boundaries(collection: FeatureCollection) -> HashMap<i64, MultiPolygon<f64>> {
    let mut index = HashMap::new();
    for feature in collection.features {
        let Some(id) = feature.properties.as_ref().and_then(feature_id) else {
            tracing::warn!("Skipping boundary feature without an id");
            continue;
        };
        match feature.geometry.and_then(Geometry::into_multi_polygon) {
            Some(boundary) => {
                index.insert(id, boundary);
            }
            None => tracing::warn!(id, "Skipping boundary with unsupported geometry"),
        }
    }
    index
}

/// Ids arrive as numbers or numeric strings depending on the export tool.
fn feature_id(props: &Map<String, Value>) -> Option<i64> {
    match props.get("id")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text(props: &Map<String, Value>, key: &str) -> String {
    props
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
