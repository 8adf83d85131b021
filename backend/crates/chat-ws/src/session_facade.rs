use crate::{ChatMessage, ConnectionId, Result as WsErrorResult};

use std::sync::Arc;

/// Per-connection delivery contract the hub fans out through.
///
/// `send` must not block: implementations queue or fail immediately. A
/// failure only affects this connection's copy of the message.
pub trait SessionFacade: Send + Sync {
    fn connection_id(&self) -> ConnectionId;

    /// Push one message toward this connection
    fn send(&self, message: &Arc<ChatMessage>) -> WsErrorResult<()>;

    /// False once the transport behind this session has gone away
    fn is_connected(&self) -> bool;
}
