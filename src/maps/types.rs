//! Google Maps Platform wire types.
//!
//! Only the fields this service reads are modelled; everything else in the
//! provider payloads is ignored.

use serde::{Deserialize, Serialize};

/// Provider status sentinel for a usable answer.
pub const STATUS_OK: &str = "OK";

/// Travel modes accepted by the Directions API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Walking,
    Driving,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Driving => "driving",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultGeometry {
    pub location: LatLng,
}

/// `geocode/json` response, forward or reverse.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub geometry: ResultGeometry,
    #[serde(default)]
    pub place_id: Option<String>,
}

/// `directions/json` response.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsRoute {
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteLeg {
    pub distance: TextValue,
    pub duration: TextValue,
    #[serde(default)]
    pub steps: Vec<RouteStep>,
}

/// Human-readable distance or duration; the raw metres/seconds value is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteStep {
    #[serde(default)]
    pub html_instructions: String,
}

/// `place/details/json` response.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDetailsResponse {
    pub status: String,
    #[serde(default)]
    pub result: PlaceDetails,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions_payload_without_steps() {
        let body = r#"{
            "status": "OK",
            "routes": [{"legs": [{
                "start_address": "Start Location",
                "distance": {"text": "5 km", "value": 5000},
                "duration": {"text": "10 mins", "value": 600}
            }]}]
        }"#;
        let parsed: DirectionsResponse = serde_json::from_str(body).unwrap();
        let leg = &parsed.routes[0].legs[0];
        assert_eq!(leg.distance.text, "5 km");
        assert_eq!(leg.duration.text, "10 mins");
        assert!(leg.steps.is_empty());
    }

    #[test]
    fn test_zero_results_payload() {
        let parsed: GeocodeResponse =
            serde_json::from_str(r#"{"status": "ZERO_RESULTS", "results": []}"#).unwrap();
        assert_eq!(parsed.status, "ZERO_RESULTS");
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn test_travel_mode_wire_names() {
        let mode: TravelMode = serde_json::from_str(r#""bicycling""#).unwrap();
        assert_eq!(mode, TravelMode::Bicycling);
        assert_eq!(TravelMode::Transit.to_string(), "transit");
        assert!(serde_json::from_str::<TravelMode>(r#""teleport""#).is_err());
    }
}
