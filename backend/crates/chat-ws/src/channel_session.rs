use crate::{
    ChatMessage, ConnectionId, Result as WsErrorResult, ServerEvent, SessionFacade, WsError,
};

use std::panic::Location;
use std::sync::Arc;

use axum::extract::ws::Message;
use error_location::ErrorLocation;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Session facade backed by a connection's bounded outbound frame channel
pub struct ChannelSession {
    connection_id: ConnectionId,
    sender: mpsc::Sender<Message>,
}

impl ChannelSession {
    pub fn new(connection_id: ConnectionId, sender: mpsc::Sender<Message>) -> Self {
        Self {
            connection_id,
            sender,
        }
    }
}

impl SessionFacade for ChannelSession {
    fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    fn send(&self, message: &Arc<ChatMessage>) -> WsErrorResult<()> {
        let frame = ServerEvent::Message(message).to_frame()?;

        self.sender.try_send(frame).map_err(|e| match e {
            TrySendError::Full(_) => WsError::SendBufferFull {
                location: ErrorLocation::from(Location::caller()),
            },
            TrySendError::Closed(_) => WsError::connection_closed("outbound channel closed"),
        })
    }

    fn is_connected(&self) -> bool {
        !self.sender.is_closed()
    }
}
