//! End-to-end tests for the live route WebSocket.

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

mod common;

type Socket = tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

async fn exchange(socket: &mut Socket, frame: String) -> Value {
    socket.send(Message::Text(frame.into())).await.unwrap();
    loop {
        let message = tokio::time::timeout(std::time::Duration::from_secs(5), socket.next())
            .await
            .expect("reply within deadline")
            .expect("socket open")
            .unwrap();
        if message.is_text() {
            return serde_json::from_str(message.to_text().unwrap()).unwrap();
        }
    }
}

#[tokio::test]
async fn test_update_frame_yields_routes() {
    let service = common::start_service().await;
    common::mock_geocode(&service.provider, "123 Main St", 40.71, -74.0, 1).await;
    common::mock_directions(&service.provider, common::one_route(), 1).await;

    let (mut socket, _) = connect_async(service.ws_url("/ws/routes/live/")).await.unwrap();
    let reply = exchange(
        &mut socket,
        json!({
            "current_location": {"latitude": 45.49, "longitude": -73.57},
            "end_location": "123 Main St",
            "mode": "walking"
        })
        .to_string(),
    )
    .await;

    assert_eq!(reply["routes"][0]["distance"], "5 km");
    assert_eq!(reply["routes"][0]["duration"], "10 mins");
}

#[tokio::test]
async fn test_bad_frame_keeps_socket_usable() {
    let service = common::start_service().await;
    common::mock_directions(&service.provider, common::one_route(), 1).await;

    let (mut socket, _) = connect_async(service.ws_url("/ws/routes/live/")).await.unwrap();

    let reply = exchange(&mut socket, "definitely not json".to_string()).await;
    assert_eq!(reply, json!({"error": "Invalid request"}));

    let reply = exchange(
        &mut socket,
        json!({"current_location": {"latitude": 45.49, "longitude": -73.57}, "end_location": 999, "mode": "walking"})
            .to_string(),
    )
    .await;
    assert_eq!(reply, json!({"error": "Invalid destination"}));

    let reply = exchange(
        &mut socket,
        json!({"current_location": {"latitude": 45.49, "longitude": -73.57}, "end_location": 7, "mode": "driving"})
            .to_string(),
    )
    .await;
    assert!(reply["routes"].is_array());

    socket.close(None).await.unwrap();
}

#[tokio::test]
async fn test_bad_destination_reported_over_bad_current_location() {
    let service = common::start_service().await;
    common::mock_directions(&service.provider, common::one_route(), 0).await;

    let (mut socket, _) = connect_async(service.ws_url("/ws/routes/live/")).await.unwrap();
    let reply = exchange(
        &mut socket,
        json!({"current_location": "123 Main St", "end_location": 999, "mode": "walking"}).to_string(),
    )
    .await;

    assert_eq!(reply, json!({"error": "Invalid destination"}));
}
