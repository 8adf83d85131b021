mod client_event;

use crate::{ChatMessage, ConnectionId, Result as WsErrorResult, SessionFacade, WsError};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Session fake that records everything delivered to it
pub(crate) struct RecordingSession {
    connection_id: ConnectionId,
    received: Mutex<Vec<Arc<ChatMessage>>>,
    connected: AtomicBool,
}

impl RecordingSession {
    pub(crate) fn new(connection_id: ConnectionId) -> Arc<Self> {
        Arc::new(Self {
            connection_id,
            received: Mutex::new(Vec::new()),
            connected: AtomicBool::new(true),
        })
    }

    pub(crate) fn received(&self) -> Vec<Arc<ChatMessage>> {
        self.received.lock().unwrap().clone()
    }

    /// (name, body) pairs in delivery order
    pub(crate) fn log(&self) -> Vec<(String, String)> {
        self.received()
            .iter()
            .map(|m| (m.name.clone(), m.body.clone()))
            .collect()
    }

    pub(crate) fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }
}

impl SessionFacade for RecordingSession {
    fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    fn send(&self, message: &Arc<ChatMessage>) -> WsErrorResult<()> {
        self.received.lock().unwrap().push(Arc::clone(message));
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

/// Session fake whose transport write always fails
pub(crate) struct FailingSession {
    connection_id: ConnectionId,
}

impl FailingSession {
    pub(crate) fn new(connection_id: ConnectionId) -> Arc<Self> {
        Arc::new(Self { connection_id })
    }
}

impl SessionFacade for FailingSession {
    fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    fn send(&self, _message: &Arc<ChatMessage>) -> WsErrorResult<()> {
        Err(WsError::connection_closed("simulated transport failure"))
    }

    fn is_connected(&self) -> bool {
        true
    }
}
