/// Per-connection quota on inbound chat events
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Events allowed per window, also the burst size
    pub max_requests: u32,
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window_secs: 60,
        }
    }
}
