use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One immutable chat utterance, as accepted by the hub.
///
/// `seq` is assigned under the hub's serialization lock, so ordering by
/// `seq` is the global arrival order. The sender is referenced by the name
/// it sent under, never by connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub seq: u64,
    pub name: String,
    #[serde(rename = "message")]
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(seq: u64, name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            seq,
            name: name.into(),
            body: body.into(),
            sent_at: Utc::now(),
        }
    }
}
