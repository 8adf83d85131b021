use crate::{
    BroadcastHub, ClientEvent, ConnectionConfig, ConnectionId, ConnectionRateLimiter, Metrics,
    Result as WsErrorResult, ServerEvent, ShutdownGuard, WsError,
};

use std::panic::Location;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use error_location::ErrorLocation;
use futures::{SinkExt, Stream, StreamExt};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::time::{Instant, MissedTickBehavior, interval_at, timeout};

/// Rejected inbound frames tolerated before the connection is closed
pub const MAX_VIOLATIONS: u32 = 5;

/// How long queued frames may take to flush after the connection ends
const WRITER_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Drives one chat socket from upgrade to close.
///
/// Outbound frames, both hub deliveries and protocol replies, flow through
/// the bounded channel whose sender was registered as this connection's
/// session; a writer task drains it into the socket.
pub struct WebSocketConnection {
    connection_id: ConnectionId,
    config: ConnectionConfig,
    metrics: Metrics,
    rate_limiter: ConnectionRateLimiter,
    hub: BroadcastHub,
    violations: u32,
}

impl WebSocketConnection {
    pub fn new(
        connection_id: ConnectionId,
        config: ConnectionConfig,
        metrics: Metrics,
        rate_limiter: ConnectionRateLimiter,
        hub: BroadcastHub,
    ) -> Self {
        Self {
            connection_id,
            config,
            metrics,
            rate_limiter,
            hub,
            violations: 0,
        }
    }

    /// Run the connection until the client leaves, the heartbeat lapses, too
    /// many violations pile up, or shutdown is signalled.
    pub async fn handle(
        self,
        socket: WebSocket,
        tx: mpsc::Sender<Message>,
        mut rx: mpsc::Receiver<Message>,
        shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()> {
        let (mut ws_sender, ws_receiver) = socket.split();

        let send_task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if ws_sender.send(msg).await.is_err() {
                    break;
                }
            }
            let _ = ws_sender.close().await;
        });

        let connection_id = self.connection_id;
        let registry = self.hub.registry().clone();

        let result = self.run(ws_receiver, &tx, shutdown_guard).await;

        // The registered session holds a sender too; the writer only ends
        // once both it and ours are gone.
        registry.unregister(connection_id).await;
        drop(tx);

        let abort = send_task.abort_handle();
        if timeout(WRITER_DRAIN_TIMEOUT, send_task).await.is_err() {
            log::warn!("Writer for connection {connection_id} did not drain in time, aborting");
            abort.abort();
        }

        result
    }

    /// Inbound side of the connection, generic over the frame stream
    pub async fn run<S, E>(
        mut self,
        mut ws_receiver: S,
        tx: &mpsc::Sender<Message>,
        mut shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()>
    where
        S: Stream<Item = Result<Message, E>> + Unpin,
        E: std::fmt::Display,
    {
        log::info!("WebSocket connection {} established", self.connection_id);
        self.metrics.connection_established();

        let heartbeat_interval = self.config.heartbeat_interval();
        let heartbeat_timeout = self.config.heartbeat_timeout();
        let mut heartbeat = interval_at(Instant::now() + heartbeat_interval, heartbeat_interval);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_seen = Instant::now();

        let result = loop {
            tokio::select! {
                msg = ws_receiver.next() => {
                    match msg {
                        Some(Ok(msg)) => {
                            last_seen = Instant::now();
                            match self.handle_client_message(msg, tx).await {
                                Ok(true) => {}
                                Ok(false) => break Ok(()),
                                Err(e) => {
                                    log::error!(
                                        "Closing connection {}: {}",
                                        self.connection_id,
                                        e
                                    );
                                    self.metrics.error_occurred(e.error_code());
                                    break Err(e);
                                }
                            }
                        }
                        Some(Err(e)) => {
                            log::error!(
                                "WebSocket error on connection {}: {}",
                                self.connection_id,
                                e
                            );
                            break Err(WsError::connection_closed(format!("WebSocket error: {e}")));
                        }
                        None => {
                            log::info!("Connection {} closed by client", self.connection_id);
                            break Ok(());
                        }
                    }
                }

                _ = heartbeat.tick() => {
                    if last_seen.elapsed() >= heartbeat_timeout {
                        log::warn!(
                            "Connection {} silent for {}s, dropping",
                            self.connection_id,
                            heartbeat_timeout.as_secs()
                        );
                        break Err(WsError::HeartbeatTimeout {
                            timeout_secs: heartbeat_timeout.as_secs(),
                            location: ErrorLocation::from(Location::caller()),
                        });
                    }
                    // A full buffer here means deliveries are already queued
                    let _ = tx.try_send(Message::Ping(Default::default()));
                }

                _ = shutdown_guard.wait() => {
                    log::info!("Shutting down connection {} gracefully", self.connection_id);
                    let _ = tx.try_send(Message::Close(None));
                    break Ok(());
                }
            }
        };

        self.metrics.connection_closed(match &result {
            Ok(()) => "normal",
            Err(e) => e.error_code(),
        });
        log::info!("WebSocket connection {} closed", self.connection_id);

        result
    }

    /// Handle one inbound frame. `Ok(false)` means the client asked to close.
    async fn handle_client_message(
        &mut self,
        msg: Message,
        tx: &mpsc::Sender<Message>,
    ) -> WsErrorResult<bool> {
        match msg {
            Message::Text(text) => {
                let outcome = match ClientEvent::parse(text.as_str()) {
                    Ok(event) => self.handle_client_event(event).await,
                    Err(e) => Err(e),
                };
                if let Err(e) = outcome {
                    self.record_violation(e, tx)?;
                }
                Ok(true)
            }
            Message::Binary(data) => {
                self.record_violation(
                    WsError::invalid_message(format!(
                        "binary frames are not supported ({} bytes)",
                        data.len()
                    )),
                    tx,
                )?;
                Ok(true)
            }
            Message::Ping(data) => {
                match tx.try_send(Message::Pong(data)) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        log::debug!(
                            "Outbound buffer full on connection {}, Pong dropped",
                            self.connection_id
                        );
                    }
                    Err(TrySendError::Closed(_)) => {
                        return Err(WsError::connection_closed("outbound channel closed"));
                    }
                }
                Ok(true)
            }
            Message::Pong(_) => Ok(true),
            Message::Close(_) => {
                log::info!("Received close frame from connection {}", self.connection_id);
                Ok(false)
            }
        }
    }

    async fn handle_client_event(&mut self, event: ClientEvent) -> WsErrorResult<()> {
        self.rate_limiter.check()?;
        self.metrics.message_received(event.event_type());

        match event {
            ClientEvent::SendMessage { name, message } => {
                match self.hub.handle_send(self.connection_id, name, message).await {
                    Ok(_) => Ok(()),
                    // Dropped without delivery; the sender simply sees no echo
                    Err(e @ WsError::UnknownConnection { .. }) => {
                        log::warn!("Send from {} dropped: {}", self.connection_id, e);
                        self.metrics.error_occurred(e.error_code());
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }
        }
    }

    /// Tell the client what was wrong with its frame and fail once the
    /// violation budget is spent
    fn record_violation(
        &mut self,
        error: WsError,
        tx: &mpsc::Sender<Message>,
    ) -> WsErrorResult<()> {
        self.violations += 1;
        log::warn!(
            "Violation {}/{} on connection {}: {}",
            self.violations,
            MAX_VIOLATIONS,
            self.connection_id,
            error
        );
        self.metrics.error_occurred(error.error_code());

        let reply = ServerEvent::Error {
            code: error.error_code(),
            message: error.to_string(),
        };
        if let Ok(frame) = reply.to_frame() {
            let _ = tx.try_send(frame);
        }

        if self.violations >= MAX_VIOLATIONS {
            return Err(WsError::invalid_message(format!(
                "too many invalid frames ({})",
                self.violations
            )));
        }
        Ok(())
    }
}
