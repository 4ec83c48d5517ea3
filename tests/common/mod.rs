//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use campus_router::config::ServiceConfig;
use campus_router::http::HttpServer;
use campus_router::lifecycle::Shutdown;
use campus_router::location::CampusDirectory;
use serde_json::Value;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const BUILDING_INFO: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": {"id": 7, "Building": "H", "Building Long Name": "Henry F. Hall Building",
                           "Address": "1455 De Maisonneuve Blvd. W.", "Campus": "SGW", "Floors": 12},
            "geometry": {"type": "Point", "coordinates": [-73.58, 45.50]}
        },
        {
            "type": "Feature",
            "properties": {"id": 8, "Building": "LB", "Campus": "SGW"},
            "geometry": {"type": "Point", "coordinates": [-73.578, 45.497]}
        }
    ]
}"#;

pub const BUILDING_BOUNDARIES: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": {"id": 7},
            "geometry": {"type": "Polygon", "coordinates": [[[10.0, 10.0], [20.0, 10.0], [20.0, 20.0], [10.0, 20.0], [10.0, 10.0]]]}
        }
    ]
}"#;

/// A running service wired to a mocked Google Maps API.
pub struct TestService {
    pub addr: SocketAddr,
    pub provider: MockServer,
    shutdown: Shutdown,
}

impl TestService {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn ws_url(&self, path: &str) -> String {
        format!("ws://{}{}", self.addr, path)
    }
}

impl Drop for TestService {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the service on an ephemeral port.
pub async fn start_service() -> TestService {
    start_service_with(|_| {}).await
}

/// Start the service after `configure` has adjusted the test config.
pub async fn start_service_with(configure: impl FnOnce(&mut ServiceConfig)) -> TestService {
    let provider = MockServer::start().await;

    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.maps.api_key = "test-key".to_string();
    config.maps.base_url = provider.uri();
    config.maps.timeout_secs = 2;
    config.retries.enabled = false;
    configure(&mut config);

    let directory = CampusDirectory::from_geojson(BUILDING_INFO, BUILDING_BOUNDARIES).unwrap();
    let server = HttpServer::new(config.clone(), Arc::new(directory)).unwrap();

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let stop = shutdown.listener();
    tokio::spawn(async move {
        let _ = server.run(listener, stop).await;
    });

    TestService { addr, provider, shutdown }
}

/// HTTP client that never goes through a proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Geocoding answers `address` with one result, exactly `calls` times.
pub async fn mock_geocode(provider: &MockServer, address: &str, lat: f64, lng: f64, calls: u64) {
    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .and(query_param("address", address))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "results": [{"geometry": {"location": {"lat": lat, "lng": lng}}}]
        })))
        .expect(calls)
        .mount(provider)
        .await;
}

/// Directions answers with `body`, exactly `calls` times.
pub async fn mock_directions(provider: &MockServer, body: Value, calls: u64) {
    Mock::given(method("GET"))
        .and(path("/directions/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(calls)
        .mount(provider)
        .await;
}

/// One OK route with a single leg.
pub fn one_route() -> Value {
    serde_json::json!({
        "status": "OK",
        "routes": [{"legs": [{
            "distance": {"text": "5 km", "value": 5000},
            "duration": {"text": "10 mins", "value": 600},
            "steps": [{"html_instructions": "Head <b>west</b>"}]
        }]}]
    })
}
