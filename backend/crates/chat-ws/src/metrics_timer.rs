use crate::Metrics;

use std::time::Instant;

/// Times one broadcast from creation to `finish`
pub struct MetricsTimer {
    start: Instant,
    metrics: Metrics,
}

impl MetricsTimer {
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Record the elapsed time. Dropping without calling this records nothing.
    pub fn finish(self) {
        self.metrics.broadcast_latency(self.start.elapsed());
    }
}
