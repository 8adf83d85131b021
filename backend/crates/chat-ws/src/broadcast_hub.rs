use crate::{
    BroadcastReport, ChatMessage, ConnectionId, ConnectionRegistry, Metrics, MetricsTimer,
    Result as WsErrorResult, WsError,
};

use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::Mutex;

/// Fans every accepted chat message out to all registered connections.
///
/// Sends are serialized: the lock is held from the sender's name update
/// through the registry snapshot to the end of the fan-out, so every
/// recipient observes messages in the same order and two fan-outs never
/// interleave.
pub struct BroadcastHub {
    registry: ConnectionRegistry,
    metrics: Metrics,
    /// Last sequence number handed out; 0 before the first message
    last_seq: Arc<Mutex<u64>>,
}

impl BroadcastHub {
    pub fn new(registry: ConnectionRegistry, metrics: Metrics) -> Self {
        Self {
            registry,
            metrics,
            last_seq: Arc::new(Mutex::new(0)),
        }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Accept one `(name, body)` event from `source` and deliver it to every
    /// registered connection, the source included.
    ///
    /// A non-empty `name` becomes the source's display name. Fails with
    /// `UnknownConnection` when `source` is not registered; nothing is
    /// delivered in that case. Per-recipient delivery failures are logged and
    /// counted in the report, never returned.
    pub async fn handle_send(
        &self,
        source: ConnectionId,
        name: impl Into<String>,
        body: impl Into<String>,
    ) -> WsErrorResult<BroadcastReport> {
        let name = name.into();
        let body = body.into();
        let timer = MetricsTimer::new(self.metrics.clone());

        let mut last_seq = self.last_seq.lock().await;

        if name.is_empty() {
            if !self.registry.contains(source).await {
                return Err(WsError::unknown_connection(source));
            }
        } else {
            self.registry.set_display_name(source, name.as_str()).await?;
        }

        *last_seq += 1;
        let message = Arc::new(ChatMessage::new(*last_seq, name, body));

        let recipients = self.registry.list_all().await;
        let mut report = BroadcastReport::new(message.seq, recipients.len());

        for connection in &recipients {
            if !connection.session.is_connected() {
                debug!(
                    "Skipping message {} for disconnected connection {}",
                    message.seq, connection.connection_id
                );
                report.skipped += 1;
                continue;
            }

            match connection.session.send(&message) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    warn!(
                        "Delivery of message {} to connection {} failed: {}",
                        message.seq, connection.connection_id, e
                    );
                    self.metrics.delivery_failed(e.error_code());
                    report.failed += 1;
                }
            }
        }

        drop(last_seq);

        debug!(
            "Broadcast message {} from {}: {}/{} delivered ({} skipped, {} failed)",
            report.seq,
            source,
            report.delivered,
            report.recipients,
            report.skipped,
            report.failed
        );
        self.metrics.broadcast_published(report.recipients, report.delivered);
        timer.finish();

        Ok(report)
    }
}

impl Clone for BroadcastHub {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            metrics: self.metrics.clone(),
            last_seq: Arc::clone(&self.last_seq),
        }
    }
}
