//! Live route updates over WebSocket.
//!
//! # Responsibilities
//! - Upgrade `GET /ws/routes/live/` connections
//! - Answer every text frame with exactly one text frame
//! - Keep the connection open across bad frames
//!
//! # Data Flow
//! ```text
//! Client ──── {current_location, end_location, mode} ───→ RoutePlanner::plan_live
//! Client ←─── {routes: [...]} | {error: "..."} ──────────┘
//! ```
//!
//! # Design Decisions
//! - Frames on one connection are handled in order; no pipelining
//! - Ping/pong is left to axum; binary frames are ignored
//! - A bad destination is reported even when the current location is bad too

use std::time::Instant;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::HeaderMap,
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;

use crate::http::request::request_id;
use crate::http::response::{ErrorBody, RoutesBody, INVALID_DESTINATION, INVALID_REQUEST, ROUTE_NOT_FOUND};
use crate::http::server::AppState;
use crate::location::Endpoint;
use crate::observability::metrics;
use crate::route::{RouteError, RouteQuery, RoutePlanner};

/// `GET /ws/routes/live/`
pub async fn live_routes(
    State(state): State<AppState>,
    headers: HeaderMap,
    upgrade: WebSocketUpgrade,
) -> Response {
    let request_id = request_id(&headers);
    upgrade.on_upgrade(move |socket| serve_connection(socket, state.planner, request_id))
}

async fn serve_connection(socket: WebSocket, planner: RoutePlanner, request_id: String) {
    tracing::info!(request_id = %request_id, "Live route connection opened");
    let (mut sender, mut receiver) = socket.split();

    while let Some(message) = receiver.next().await {
        let text = match message {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!(request_id = %request_id, error = %e, "Live route connection error");
                break;
            }
        };

        let reply = answer_frame(&planner, text.as_str(), &request_id).await;
        if sender.send(Message::Text(reply.into())).await.is_err() {
            break;
        }
    }

    tracing::info!(request_id = %request_id, "Live route connection closed");
}

async fn answer_frame(planner: &RoutePlanner, text: &str, request_id: &str) -> String {
    let start = Instant::now();
    let result = match RouteQuery::from_live_frame(text) {
        Ok(query) => planner.plan_live(&query).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(routes) => {
            metrics::record_route_request("websocket", "ok", start);
            encode(&RoutesBody { routes })
        }
        Err(e) => {
            tracing::warn!(request_id = %request_id, kind = e.kind(), error = %e, "Live route update failed");
            metrics::record_route_request("websocket", e.kind(), start);
            encode(&ErrorBody::new(error_message(&e)))
        }
    }
}

fn error_message(error: &RouteError) -> &'static str {
    match error {
        RouteError::InvalidRequest(_) => INVALID_REQUEST,
        RouteError::LocationUnresolved { endpoint: Endpoint::End, .. } => INVALID_DESTINATION,
        _ => ROUTE_NOT_FOUND,
    }
}

fn encode<T: Serialize>(body: &T) -> String {
    serde_json::to_string(body).unwrap_or_else(|_| format!(r#"{{"error":"{}"}}"#, ROUTE_NOT_FOUND))
}
