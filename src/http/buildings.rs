use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::http::request::request_id;
use crate::http::response::error_response;
use crate::http::server::AppState;
use crate::location::PlaceInfoError;

/// `GET /api/buildings/{id}/info`
pub async fn building_info(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    let request_id = request_id(&headers);

    match state.place_info.place_info(id).await {
        Ok(info) => (StatusCode::OK, Json(info)).into_response(),
        Err(PlaceInfoError::UnknownBuilding(_)) => {
            tracing::debug!(request_id = %request_id, building = id, "Unknown building");
            error_response(StatusCode::NOT_FOUND, "Building not found")
        }
        Err(e) => {
            tracing::warn!(request_id = %request_id, building = id, error = %e, "Building info lookup failed");
            error_response(StatusCode::BAD_GATEWAY, "Building info unavailable")
        }
    }
}
