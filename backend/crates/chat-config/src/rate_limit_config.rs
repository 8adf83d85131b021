use crate::{ConfigErrorResult, ConfigSection};
use crate::range::check_range;

use serde::Deserialize;

pub const MIN_RATE_LIMIT_REQUESTS: u32 = 1;
pub const MAX_RATE_LIMIT_REQUESTS: u32 = 10000;
pub const DEFAULT_RATE_LIMIT_REQUESTS: u32 = 100;

pub const MIN_RATE_LIMIT_WINDOW_SECS: u64 = 1;
pub const MAX_RATE_LIMIT_WINDOW_SECS: u64 = 3600;
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Per-connection quota for inbound chat events.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Inbound events allowed per window
    pub max_requests: u32,
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_RATE_LIMIT_REQUESTS,
            window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS,
        }
    }
}

impl RateLimitConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        check_range(
            ConfigSection::RateLimit,
            "max_requests",
            self.max_requests,
            MIN_RATE_LIMIT_REQUESTS,
            MAX_RATE_LIMIT_REQUESTS,
        )?;
        check_range(
            ConfigSection::RateLimit,
            "window_secs",
            self.window_secs,
            MIN_RATE_LIMIT_WINDOW_SECS,
            MAX_RATE_LIMIT_WINDOW_SECS,
        )
    }
}
