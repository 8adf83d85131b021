/// Outcome of one hub fan-out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Sequence number given to the message
    pub seq: u64,
    /// Connections in the snapshot the message was fanned out to
    pub recipients: usize,
    pub delivered: usize,
    /// Sessions already disconnected when their turn came
    pub skipped: usize,
    /// Sessions whose send returned an error
    pub failed: usize,
}

impl BroadcastReport {
    pub fn new(seq: u64, recipients: usize) -> Self {
        Self {
            seq,
            recipients,
            delivered: 0,
            skipped: 0,
            failed: 0,
        }
    }
}
