#![allow(dead_code)]

//! Test infrastructure for chat-server route tests

use chat_server::build_router;
use chat_ws::{
    AppState, ConnectionConfig, ConnectionLimits, ConnectionRegistry, Metrics,
    RateLimiterFactory, ShutdownCoordinator,
};

use axum_test::TestServer;

pub fn create_test_app_state() -> AppState {
    AppState::new(
        ConnectionRegistry::new(ConnectionLimits::default()),
        RateLimiterFactory::default(),
        Metrics::new(),
        ShutdownCoordinator::new(),
        ConnectionConfig::default(),
    )
}

/// Full router over a real HTTP transport so WebSocket routes work too
pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::builder()
        .http_transport()
        .build(build_router(state))
        .expect("Failed to create test server")
}
