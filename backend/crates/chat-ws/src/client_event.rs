use crate::{Result as WsErrorResult, WsError};

use serde::{Deserialize, Serialize};

/// Events a chat client may send over its socket.
///
/// Wire form: `{"event":"sendMessage","data":{"name":"Bob","message":"hi"}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    SendMessage { name: String, message: String },
}

impl ClientEvent {
    /// Decode one text frame
    #[track_caller]
    pub fn parse(text: &str) -> WsErrorResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| WsError::invalid_message(format!("undecodable client event: {e}")))
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SendMessage { .. } => "send_message",
        }
    }
}
