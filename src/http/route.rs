use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::http::request::request_id;
use crate::http::response::{error_response, RoutesBody, ROUTE_NOT_FOUND};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::route::RouteQuery;

/// `POST /api/route/`
///
/// The body is parsed here rather than by the `Json` extractor so that a
/// malformed body gets the same `400 {"error": ...}` shape as a failed
/// resolution.
pub async fn plan_route(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers);

    let result = match RouteQuery::from_request_body(&body) {
        Ok(query) => {
            tracing::debug!(
                request_id = %request_id,
                start = query.start.kind(),
                end = query.end.kind(),
                mode = %query.mode,
                "Route request"
            );
            state.planner.plan(&query).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(routes) => {
            tracing::info!(request_id = %request_id, routes = routes.len(), "Route request served");
            metrics::record_route_request("http", "ok", start);
            (StatusCode::OK, Json(RoutesBody { routes })).into_response()
        }
        Err(e) => {
            tracing::warn!(request_id = %request_id, kind = e.kind(), error = %e, "Route request failed");
            metrics::record_route_request("http", e.kind(), start);
            error_response(StatusCode::BAD_REQUEST, ROUTE_NOT_FOUND)
        }
    }
}
