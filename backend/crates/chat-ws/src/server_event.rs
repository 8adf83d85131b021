use crate::{ChatMessage, Result as WsErrorResult};

use axum::extract::ws::Message;
use serde::Serialize;

/// Events pushed from the server to a chat client.
///
/// Wire form: `{"event":"message","data":{"name":..,"message":..,"seq":..,"sentAt":..}}`
/// or `{"event":"error","data":{"code":..,"message":..}}`.
#[derive(Debug, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent<'a> {
    Message(&'a ChatMessage),
    Error { code: &'a str, message: String },
}

impl ServerEvent<'_> {
    pub fn to_json(&self) -> WsErrorResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encode as a WebSocket text frame
    pub fn to_frame(&self) -> WsErrorResult<Message> {
        Ok(Message::Text(self.to_json()?.into()))
    }
}
