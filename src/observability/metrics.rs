//! Metrics collection and exposition.
//!
//! # Metrics
//! - `campus_router_requests_total` (counter): routing requests by transport, outcome
//! - `campus_router_request_duration_seconds` (histogram): routing latency by transport
//! - `campus_router_provider_calls_total` (counter): Google Maps calls by api, outcome
//! - `campus_router_provider_duration_seconds` (histogram): provider latency by api

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder with its own HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one routing request. `outcome` is `ok` or an error kind.
pub fn record_route_request(transport: &'static str, outcome: &'static str, start: Instant) {
    ::metrics::counter!(
        "campus_router_requests_total",
        "transport" => transport,
        "outcome" => outcome
    )
    .increment(1);
    ::metrics::histogram!(
        "campus_router_request_duration_seconds",
        "transport" => transport
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one call to an external provider endpoint.
pub fn record_provider_call(api: &'static str, outcome: &'static str, start: Instant) {
    ::metrics::counter!(
        "campus_router_provider_calls_total",
        "api" => api,
        "outcome" => outcome
    )
    .increment(1);
    ::metrics::histogram!(
        "campus_router_provider_duration_seconds",
        "api" => api
    )
    .record(start.elapsed().as_secs_f64());
}
