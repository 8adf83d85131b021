//! Stateless HTTP routes kept beside the real-time path. They neither read
//! nor touch the hub.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// GET /messages
pub async fn list_messages() -> Response {
    (StatusCode::OK, "Messages route").into_response()
}

/// POST /messages/send
pub async fn send_message() -> Response {
    (StatusCode::OK, "Message sent").into_response()
}
