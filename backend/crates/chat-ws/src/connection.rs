use crate::{ConnectionId, SessionFacade};

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

/// Registry snapshot of one live connection
#[derive(Clone)]
pub struct Connection {
    pub connection_id: ConnectionId,
    /// Empty until the client sends a message with a name
    pub display_name: String,
    pub connected_at: DateTime<Utc>,
    pub session: Arc<dyn SessionFacade>,
}

impl Connection {
    /// Time since the connection registered
    pub fn connected_for(&self) -> TimeDelta {
        Utc::now() - self.connected_at
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("connection_id", &self.connection_id)
            .field("display_name", &self.display_name)
            .field("connected_at", &self.connected_at)
            .finish_non_exhaustive()
    }
}
