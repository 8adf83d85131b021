use crate::{ConnectionRateLimiter, RateLimitConfig};

/// Builds a fresh limiter for each accepted connection
#[derive(Clone, Default)]
pub struct RateLimiterFactory {
    config: RateLimitConfig,
}

impl RateLimiterFactory {
    pub fn new(config: RateLimitConfig) -> Self {
        Self { config }
    }

    pub fn create(&self) -> ConnectionRateLimiter {
        ConnectionRateLimiter::new(self.config.clone())
    }
}
