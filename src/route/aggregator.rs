//! Directions lookup and reshaping of provider routes.
//!
//! # Responsibilities
//! - Issue one directions request per query (retries stay inside the client)
//! - Keep the provider's route order
//! - Reduce every route to its first leg's distance, duration and steps

use serde::Serialize;

use crate::location::GeoCoordinate;
use crate::maps::types::DirectionsRoute;
use crate::maps::{MapsClient, TravelMode, STATUS_OK};
use crate::route::error::RouteError;

/// One alternative route as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteCandidate {
    pub distance: String,
    pub duration: String,
    pub steps: Vec<String>,
}

impl RouteCandidate {
    /// Only `legs[0]` is read; multi-leg routes lose their later legs.
    fn from_route(route: DirectionsRoute) -> Option<Self> {
        let leg = route.legs.into_iter().next()?;
        Some(Self {
            distance: leg.distance.text,
            duration: leg.duration.text,
            steps: leg.steps.into_iter().map(|s| s.html_instructions).collect(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct RouteAggregator {
    maps: MapsClient,
}

impl RouteAggregator {
    pub fn new(maps: MapsClient) -> Self {
        Self { maps }
    }

    pub async fn fetch_routes(
        &self,
        start: GeoCoordinate,
        end: GeoCoordinate,
        mode: TravelMode,
    ) -> Result<Vec<RouteCandidate>, RouteError> {
        let response = self
            .maps
            .directions(start, end, mode)
            .await
            .map_err(RouteError::Transport)?;

        if response.status != STATUS_OK {
            tracing::info!(
                status = %response.status,
                message = response.error_message.as_deref().unwrap_or(""),
                "Directions provider returned no route"
            );
            return Err(RouteError::NoRouteFound { status: response.status });
        }

        let total = response.routes.len();
        let candidates: Vec<RouteCandidate> = response
            .routes
            .into_iter()
            .enumerate()
            .filter_map(|(index, route)| {
                let candidate = RouteCandidate::from_route(route);
                if candidate.is_none() {
                    tracing::warn!(index, "Skipping directions route without legs");
                }
                candidate
            })
            .collect();

        if candidates.is_empty() {
            return Err(RouteError::NoRouteFound { status: response.status });
        }

        tracing::debug!(%mode, routes = candidates.len(), skipped = total - candidates.len(), "Routes fetched");
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MapsConfig, RetryConfig};
    use crate::maps::MapsError;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn aggregator(server: &MockServer) -> RouteAggregator {
        let config = MapsConfig {
            api_key: "test-key".to_string(),
            base_url: server.uri(),
            ..Default::default()
        };
        let retry = RetryConfig { enabled: false, ..Default::default() };
        RouteAggregator::new(MapsClient::new(&config, retry).unwrap())
    }

    fn coord(lat: f64, lng: f64) -> GeoCoordinate {
        GeoCoordinate::new(lat, lng).unwrap()
    }

    async fn mount_directions(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/directions/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_routes_keep_provider_order_and_first_leg() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/directions/json"))
            .and(query_param("origin", "45.5,-73.58"))
            .and(query_param("destination", "40.71,-74.0"))
            .and(query_param("mode", "walking"))
            .and(query_param("alternatives", "true"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "routes": [
                    {"legs": [
                        {"distance": {"text": "9 km"}, "duration": {"text": "2 hours"},
                         "steps": [{"html_instructions": "Head <b>north</b>"}, {"html_instructions": "Turn left"}]},
                        {"distance": {"text": "1 km"}, "duration": {"text": "5 mins"}}
                    ]},
                    {"legs": [{"distance": {"text": "5 km"}, "duration": {"text": "10 mins"}}]}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let routes = aggregator(&server)
            .fetch_routes(coord(45.50, -73.58), coord(40.71, -74.0), TravelMode::Walking)
            .await
            .unwrap();

        assert_eq!(
            routes,
            vec![
                RouteCandidate {
                    distance: "9 km".to_string(),
                    duration: "2 hours".to_string(),
                    steps: vec!["Head <b>north</b>".to_string(), "Turn left".to_string()],
                },
                RouteCandidate {
                    distance: "5 km".to_string(),
                    duration: "10 mins".to_string(),
                    steps: vec![],
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_non_ok_status_is_no_route() {
        let server = MockServer::start().await;
        mount_directions(&server, serde_json::json!({"status": "ZERO_RESULTS", "routes": []})).await;

        let err = aggregator(&server)
            .fetch_routes(coord(1.0, 2.0), coord(3.0, 4.0), TravelMode::Driving)
            .await
            .unwrap_err();
        assert!(matches!(err, RouteError::NoRouteFound { ref status } if status == "ZERO_RESULTS"));
    }

    #[tokio::test]
    async fn test_routes_without_legs_are_skipped() {
        let server = MockServer::start().await;
        mount_directions(
            &server,
            serde_json::json!({
                "status": "OK",
                "routes": [
                    {"legs": []},
                    {"legs": [{"distance": {"text": "5 km"}, "duration": {"text": "10 mins"}}]}
                ]
            }),
        )
        .await;

        let routes = aggregator(&server)
            .fetch_routes(coord(1.0, 2.0), coord(3.0, 4.0), TravelMode::Transit)
            .await
            .unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].distance, "5 km");
    }

    #[tokio::test]
    async fn test_ok_without_usable_routes_is_no_route() {
        let server = MockServer::start().await;
        mount_directions(&server, serde_json::json!({"status": "OK", "routes": [{"legs": []}]})).await;

        let err = aggregator(&server)
            .fetch_routes(coord(1.0, 2.0), coord(3.0, 4.0), TravelMode::Walking)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "no_route_found");
    }

    #[tokio::test]
    async fn test_http_failure_is_transport() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = aggregator(&server)
            .fetch_routes(coord(1.0, 2.0), coord(3.0, 4.0), TravelMode::Walking)
            .await
            .unwrap_err();
        assert!(matches!(err, RouteError::Transport(MapsError::Http(500))));
    }
}
