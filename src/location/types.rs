//! Location value types shared by the resolver, the directory and the routes.

use geo::{Contains, MultiPolygon, Point};
use serde::{Deserialize, Serialize};

/// A resolved geographic position.
///
/// Only constructible with finite components; a failed resolution has no
/// coordinate at all rather than a NaN-filled one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    /// Returns `None` unless both components are finite.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        (latitude.is_finite() && longitude.is_finite()).then_some(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// `"lat,lng"` as sent to the provider.
    ///
    /// Debug formatting keeps a fractional digit on whole numbers (`-74.0`).
    pub fn query_value(&self) -> String {
        format!("{:?},{:?}", self.latitude, self.longitude)
    }
}

/// Coordinate system of an `{x, y}` reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateFrame {
    /// Floor-plan coordinate; must fall inside a building boundary.
    Floor,
    /// Raw `(latitude, longitude)` pair.
    Gps,
}

/// A caller-supplied location that has not been resolved yet.
///
/// The variant is decided once, when the request is deserialized:
/// a JSON integer, an object with `latitude`/`longitude`, an object with
/// `x`/`y` (and optional `frame`), or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationReference {
    ById(i64),
    ByGps {
        latitude: f64,
        longitude: f64,
    },
    ByCoordinate {
        x: f64,
        y: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        frame: Option<CoordinateFrame>,
    },
    ByAddress(String),
}

impl LocationReference {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            LocationReference::ById(_) => "building_id",
            LocationReference::ByGps { .. } => "gps",
            LocationReference::ByCoordinate { .. } => "coordinate",
            LocationReference::ByAddress(_) => "address",
        }
    }
}

/// Floor layout of a building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndoorGrid {
    pub floors: u32,
}

/// A stored building record.
///
/// Geometry and indoor layout are optional capabilities rather than
/// subtypes; a building loaded without a boundary simply never matches a
/// containment lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub id: i64,
    pub name: String,
    pub long_name: String,
    pub address: String,
    pub campus: String,
    pub coordinate: GeoCoordinate,
    /// Boundary in GeoJSON axis order (x = longitude, y = latitude).
    pub boundary: Option<MultiPolygon<f64>>,
    pub indoor: Option<IndoorGrid>,
}

impl Place {
    /// Display name, preferring the long form.
    pub fn long_name_or_name(&self) -> String {
        if self.long_name.is_empty() {
            self.name.clone()
        } else {
            self.long_name.clone()
        }
    }

    pub fn contains(&self, point: &Point<f64>) -> bool {
        self.boundary
            .as_ref()
            .map(|boundary| boundary.contains(point))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coordinate_rejects_non_finite() {
        assert!(GeoCoordinate::new(f64::NAN, 1.0).is_none());
        assert!(GeoCoordinate::new(1.0, f64::INFINITY).is_none());
        assert!(GeoCoordinate::new(45.5, -73.58).is_some());
    }

    #[test]
    fn test_query_value_formatting() {
        let start = GeoCoordinate::new(45.50, -73.58).unwrap();
        let end = GeoCoordinate::new(40.71, -74.0).unwrap();
        assert_eq!(start.query_value(), "45.5,-73.58");
        assert_eq!(end.query_value(), "40.71,-74.0");
    }

    #[test]
    fn test_reference_variants_from_json() {
        let by_id: LocationReference = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(by_id, LocationReference::ById(7));

        let gps: LocationReference =
            serde_json::from_value(json!({"latitude": 45.5, "longitude": -73.5})).unwrap();
        assert_eq!(gps, LocationReference::ByGps { latitude: 45.5, longitude: -73.5 });

        let grid: LocationReference = serde_json::from_value(json!({"x": 120, "y": 48})).unwrap();
        assert_eq!(grid, LocationReference::ByCoordinate { x: 120.0, y: 48.0, frame: None });

        let floor: LocationReference =
            serde_json::from_value(json!({"x": 1, "y": 2, "frame": "floor"})).unwrap();
        assert_eq!(
            floor,
            LocationReference::ByCoordinate { x: 1.0, y: 2.0, frame: Some(CoordinateFrame::Floor) }
        );

        let address: LocationReference = serde_json::from_value(json!("123 Main St")).unwrap();
        assert_eq!(address, LocationReference::ByAddress("123 Main St".to_string()));
    }

    #[test]
    fn test_gps_keys_take_precedence_over_grid_keys() {
        let both: LocationReference = serde_json::from_value(
            json!({"latitude": 1.0, "longitude": 2.0, "x": 3.0, "y": 4.0}),
        )
        .unwrap();
        assert_eq!(both.kind(), "gps");
    }

    #[test]
    fn test_unsupported_shapes_are_rejected() {
        for value in [json!(7.5), json!(true), json!(null), json!({"x": 1})] {
            assert!(
                serde_json::from_value::<LocationReference>(value.clone()).is_err(),
                "{} should not parse",
                value
            );
        }
    }
}
