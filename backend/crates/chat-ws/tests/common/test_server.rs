#![allow(dead_code)]

use chat_ws::{
    AppState, ConnectionConfig, ConnectionLimits, ConnectionRegistry, Metrics, RateLimitConfig,
    RateLimiterFactory, ShutdownCoordinator,
};

use axum::{Router, routing::get};
use axum_test::TestServer;

/// Knobs for a test server instance
#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub max_connections_total: usize,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window_secs: u64,
    pub send_buffer_size: usize,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            max_connections_total: 100,
            rate_limit_max_requests: 100,
            rate_limit_window_secs: 60,
            send_buffer_size: 100,
        }
    }
}

impl TestServerConfig {
    /// Small connection cap for limit tests
    pub fn with_strict_limits() -> Self {
        Self {
            max_connections_total: 2,
            ..Default::default()
        }
    }

    pub fn with_strict_rate_limits() -> Self {
        Self {
            rate_limit_max_requests: 3,
            rate_limit_window_secs: 60,
            ..Default::default()
        }
    }
}

/// Test server with access to AppState for assertions
pub struct TestServerWithState {
    pub server: TestServer,
    pub app_state: AppState,
}

pub fn create_test_server() -> TestServerWithState {
    create_test_server_with_config(TestServerConfig::default())
}

pub fn create_test_server_with_config(config: TestServerConfig) -> TestServerWithState {
    let (app, app_state) = create_app(config);
    let server = TestServer::builder()
        .http_transport()
        .build(app)
        .expect("Failed to create test server");

    TestServerWithState { server, app_state }
}

fn create_app(config: TestServerConfig) -> (Router, AppState) {
    let rate_limiter_factory = RateLimiterFactory::new(RateLimitConfig {
        max_requests: config.rate_limit_max_requests,
        window_secs: config.rate_limit_window_secs,
    });

    let registry = ConnectionRegistry::new(ConnectionLimits {
        max_total: config.max_connections_total,
    });

    let connection_config = ConnectionConfig {
        send_buffer_size: config.send_buffer_size,
        ..ConnectionConfig::default()
    };

    let app_state = AppState::new(
        registry,
        rate_limiter_factory,
        Metrics::default(),
        ShutdownCoordinator::new(),
        connection_config,
    );

    let router = Router::new()
        .route("/ws", get(chat_ws::handler))
        .with_state(app_state.clone());

    (router, app_state)
}
