//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (request ID, tracing, body limit, timeout)
//! - Build the shared routing components once and hand them to handlers
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::Request,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::buildings::building_info;
use crate::http::request::{MakeRequestUuidV4, X_REQUEST_ID};
use crate::http::route::plan_route;
use crate::http::websocket::live_routes;
use crate::lifecycle::ShutdownListener;
use crate::location::{BuildingDirectory, LocationResolver, PlaceInfoService};
use crate::maps::{MapsClient, MapsError};
use crate::route::{RouteAggregator, RoutePlanner};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub planner: RoutePlanner,
    pub place_info: PlaceInfoService,
}

impl AppState {
    /// Wire the routing components around one shared provider client.
    pub fn new(config: &ServiceConfig, directory: Arc<dyn BuildingDirectory>) -> Result<Self, MapsError> {
        let maps = MapsClient::new(&config.maps, config.retries.clone())?;
        let resolver = LocationResolver::new(directory.clone(), maps.clone());
        Ok(Self {
            planner: RoutePlanner::new(
                resolver,
                RouteAggregator::new(maps.clone()),
                Duration::from_secs(config.timeouts.request_secs),
            ),
            place_info: PlaceInfoService::new(directory, maps),
        })
    }
}

/// HTTP server for the routing API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig, directory: Arc<dyn BuildingDirectory>) -> Result<Self, MapsError> {
        let state = AppState::new(&config, directory)?;
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Route planning enforces `request_secs` itself and answers with the
    /// usual error body; the layer timeout is a one-second-later backstop.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/route/", post(plan_route))
            .route("/ws/routes/live/", get(live_routes))
            .route("/api/buildings/{id}/info", get(building_info))
            .route("/health", get(health))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs.saturating_add(1))))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config.timeouts.request_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.recv())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}
