use crate::{
    BroadcastHub, ChannelSession, ConnectionConfig, ConnectionId, ConnectionRateLimiter,
    ConnectionRegistry, Metrics, RateLimiterFactory, ShutdownCoordinator, WebSocketConnection,
    create_connection_span,
};
use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::Response,
};

use std::sync::Arc;

use log::{debug, error, warn};
use tokio::sync::mpsc;
use tracing::Instrument;

/// Shared state for the chat WebSocket endpoint
#[derive(Clone)]
pub struct AppState {
    pub registry: ConnectionRegistry,
    pub hub: BroadcastHub,
    pub rate_limiter_factory: RateLimiterFactory,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
}

impl AppState {
    /// Wire a hub onto `registry` so both observe the same connection set
    pub fn new(
        registry: ConnectionRegistry,
        rate_limiter_factory: RateLimiterFactory,
        metrics: Metrics,
        shutdown: ShutdownCoordinator,
        config: ConnectionConfig,
    ) -> Self {
        let hub = BroadcastHub::new(registry.clone(), metrics.clone());
        Self {
            registry,
            hub,
            rate_limiter_factory,
            metrics,
            shutdown,
            config,
        }
    }
}

/// WebSocket upgrade handler.
///
/// The connection is registered before the upgrade completes so a full
/// registry can be answered with 503 instead of an accepted-then-closed socket.
pub async fn handler(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> Result<Response, StatusCode> {
    if state.shutdown.is_shutdown() {
        warn!("Rejecting WebSocket upgrade during shutdown");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    let connection_id = ConnectionId::new();
    let (tx, rx) = mpsc::channel::<Message>(state.config.send_buffer_size);
    let session = Arc::new(ChannelSession::new(connection_id, tx.clone()));

    state
        .registry
        .register(connection_id, session)
        .await
        .map_err(|e| {
            error!("Failed to register connection: {}", e);
            state.metrics.error_occurred(e.error_code());
            StatusCode::SERVICE_UNAVAILABLE
        })?;

    debug!("WebSocket upgrade accepted for connection {}", connection_id);

    let rate_limiter = state.rate_limiter_factory.create();
    let registry = state.registry.clone();

    Ok(ws
        .on_failed_upgrade(move |e| {
            warn!("WebSocket upgrade for connection {connection_id} failed: {e}");
            tokio::spawn(async move { registry.unregister(connection_id).await });
        })
        .on_upgrade(move |socket| {
            handle_socket(socket, connection_id, tx, rx, state, rate_limiter)
        }))
}

/// Handle WebSocket connection after upgrade
async fn handle_socket(
    socket: WebSocket,
    connection_id: ConnectionId,
    tx: mpsc::Sender<Message>,
    rx: mpsc::Receiver<Message>,
    state: AppState,
    rate_limiter: ConnectionRateLimiter,
) {
    let shutdown_guard = state.shutdown.subscribe_guard();

    let connection = WebSocketConnection::new(
        connection_id,
        state.config.clone(),
        state.metrics.clone(),
        rate_limiter,
        state.hub.clone(),
    );

    let result = connection
        .handle(socket, tx, rx, shutdown_guard)
        .instrument(create_connection_span(connection_id))
        .await;

    // Already done by the connection on a normal exit; repeated unregister is a no-op
    state.registry.unregister(connection_id).await;

    if let Err(e) = result {
        error!("Connection {connection_id} error: {e}");
    }
}
