#![allow(dead_code)]

use axum_test::{TestServer, TestWebSocket};
use serde_json::{Value, json};
use tokio::time::{Duration, timeout};

/// How long a client waits for a frame before the test fails
pub const RECEIVE_TIMEOUT: Duration = Duration::from_secs(5);

/// WebSocket chat client wrapper
pub struct ChatTestClient {
    ws: TestWebSocket,
}

impl ChatTestClient {
    pub async fn connect(server: &TestServer) -> Self {
        let ws = server.get_websocket("/ws").await.into_websocket().await;
        Self { ws }
    }

    /// Send a `sendMessage` event
    pub async fn send_message(&mut self, name: &str, message: &str) {
        let event = json!({
            "event": "sendMessage",
            "data": { "name": name, "message": message },
        });
        self.ws.send_text(event.to_string()).await;
    }

    pub async fn send_text(&mut self, text: impl std::fmt::Display) {
        self.ws.send_text(text).await;
    }

    /// Next server event as JSON
    pub async fn receive_event(&mut self) -> Value {
        let text = timeout(RECEIVE_TIMEOUT, self.ws.receive_text())
            .await
            .expect("Timed out waiting for server event");
        serde_json::from_str(&text).expect("Server sent invalid JSON")
    }

    /// Next `message` event as (name, body)
    pub async fn receive_chat(&mut self) -> (String, String) {
        let event = self.receive_event().await;
        assert_eq!(event["event"], "message", "unexpected event: {event}");
        (
            event["data"]["name"].as_str().unwrap_or_default().to_string(),
            event["data"]["message"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
        )
    }

    pub async fn close(self) {
        self.ws.close().await;
    }
}

/// Connect `count` clients in order
pub async fn connect_clients(server: &TestServer, count: usize) -> Vec<ChatTestClient> {
    let mut clients = Vec::with_capacity(count);
    for _ in 0..count {
        clients.push(ChatTestClient::connect(server).await);
    }
    clients
}

pub fn chat(name: &str, body: &str) -> (String, String) {
    (name.to_string(), body.to_string())
}
