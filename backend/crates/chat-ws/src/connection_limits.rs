/// Capacity limits enforced by the registry
#[derive(Debug, Clone)]
pub struct ConnectionLimits {
    /// Maximum live connections
    pub max_total: usize,
}

impl Default for ConnectionLimits {
    fn default() -> Self {
        Self { max_total: 10000 }
    }
}
