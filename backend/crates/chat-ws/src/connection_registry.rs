use crate::{
    Connection, ConnectionId, ConnectionLimits, Result as WsErrorResult, SessionFacade, WsError,
};

use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, info, warn};
use tokio::sync::RwLock;

/// Authoritative set of live chat connections.
///
/// Cloning yields another handle to the same set. Snapshots come back in
/// registration order.
pub struct ConnectionRegistry {
    inner: Arc<RwLock<RegistryInner>>,
    limits: ConnectionLimits,
}

struct RegistryInner {
    connections: HashMap<ConnectionId, Connection>,
    /// Registration order; always holds exactly the keys of `connections`
    order: Vec<ConnectionId>,
}

impl ConnectionRegistry {
    pub fn new(limits: ConnectionLimits) -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                connections: HashMap::new(),
                order: Vec::new(),
            })),
            limits,
        }
    }

    /// Add a connection with an empty display name
    pub async fn register(
        &self,
        connection_id: ConnectionId,
        session: Arc<dyn SessionFacade>,
    ) -> WsErrorResult<()> {
        let mut inner = self.inner.write().await;

        if inner.connections.contains_key(&connection_id) {
            warn!("Connection {connection_id} registered twice");
            return Err(WsError::DuplicateConnection {
                connection_id,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if inner.connections.len() >= self.limits.max_total {
            warn!(
                "Total connection limit reached: {}/{}",
                inner.connections.len(),
                self.limits.max_total
            );
            return Err(WsError::ConnectionLimitExceeded {
                current: inner.connections.len(),
                max: self.limits.max_total,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        inner.connections.insert(
            connection_id,
            Connection {
                connection_id,
                display_name: String::new(),
                connected_at: chrono::Utc::now(),
                session,
            },
        );
        inner.order.push(connection_id);

        info!(
            "Registered connection {connection_id} ({} total)",
            inner.connections.len()
        );

        Ok(())
    }

    /// Remove a connection. Absent identifiers are ignored so duplicate
    /// disconnect notifications are harmless.
    pub async fn unregister(&self, connection_id: ConnectionId) {
        let mut inner = self.inner.write().await;

        if let Some(connection) = inner.connections.remove(&connection_id) {
            inner.order.retain(|id| *id != connection_id);
            info!(
                "Unregistered connection {connection_id} after {}s ({} total remaining)",
                connection.connected_for().num_seconds(),
                inner.connections.len()
            );
        } else {
            debug!("Unregister of unknown connection {connection_id} ignored");
        }
    }

    /// Remember the name a connection most recently sent under
    pub async fn set_display_name(
        &self,
        connection_id: ConnectionId,
        name: impl Into<String>,
    ) -> WsErrorResult<()> {
        let mut inner = self.inner.write().await;

        match inner.connections.get_mut(&connection_id) {
            Some(connection) => {
                connection.display_name = name.into();
                Ok(())
            }
            None => Err(WsError::UnknownConnection {
                connection_id,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Snapshot of all live connections in registration order
    pub async fn list_all(&self) -> Vec<Connection> {
        let inner = self.inner.read().await;
        inner
            .order
            .iter()
            .filter_map(|id| inner.connections.get(id).cloned())
            .collect()
    }

    pub async fn get(&self, connection_id: ConnectionId) -> Option<Connection> {
        let inner = self.inner.read().await;
        inner.connections.get(&connection_id).cloned()
    }

    pub async fn contains(&self, connection_id: ConnectionId) -> bool {
        let inner = self.inner.read().await;
        inner.connections.contains_key(&connection_id)
    }

    pub async fn total_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.connections.len()
    }
}

impl Clone for ConnectionRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            limits: self.limits.clone(),
        }
    }
}
