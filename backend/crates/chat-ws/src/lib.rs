pub mod app_state;
pub mod broadcast_hub;
pub mod broadcast_report;
pub mod channel_session;
pub mod chat_message;
pub mod client_event;
pub mod connection;
pub mod connection_config;
pub mod connection_id;
pub mod connection_limits;
pub mod connection_rate_limiter;
pub mod connection_registry;
pub mod error;
pub mod metrics;
pub mod metrics_timer;
pub mod rate_limit_config;
pub mod rate_limiter_factory;
pub mod server_event;
pub mod session_facade;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod web_socket_connection;

pub use app_state::{AppState, handler};
pub use broadcast_hub::BroadcastHub;
pub use broadcast_report::BroadcastReport;
pub use channel_session::ChannelSession;
pub use chat_message::ChatMessage;
pub use client_event::ClientEvent;
pub use connection::Connection;
pub use connection_config::ConnectionConfig;
pub use connection_id::ConnectionId;
pub use connection_limits::ConnectionLimits;
pub use connection_rate_limiter::ConnectionRateLimiter;
pub use connection_registry::ConnectionRegistry;
pub use error::{Result, WsError};
pub use metrics::Metrics;
pub use metrics_timer::MetricsTimer;
pub use rate_limit_config::RateLimitConfig;
pub use rate_limiter_factory::RateLimiterFactory;
pub use server_event::ServerEvent;
pub use session_facade::SessionFacade;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use web_socket_connection::{MAX_VIOLATIONS, WebSocketConnection};

#[cfg(test)]
mod tests;

use tracing::info_span;

/// Create a tracing span for one chat connection.
/// All log entries emitted while the connection runs carry its id.
pub fn create_connection_span(connection_id: ConnectionId) -> tracing::Span {
    info_span!("ws_connection", connection_id = %connection_id)
}
