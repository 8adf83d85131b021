use std::time::Duration;

/// Per-socket transport settings
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Outbound frames buffered before the client counts as slow
    pub send_buffer_size: usize,
    pub heartbeat_interval_secs: u64,
    /// Inbound silence tolerated before the connection is dropped
    pub heartbeat_timeout_secs: u64,
}

impl ConnectionConfig {
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_interval_secs)
    }

    pub fn heartbeat_timeout(&self) -> Duration {
        Duration::from_secs(self.heartbeat_timeout_secs)
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: 100,
            heartbeat_interval_secs: 30,
            heartbeat_timeout_secs: 60,
        }
    }
}
