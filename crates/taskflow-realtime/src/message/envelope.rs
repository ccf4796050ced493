//! Wire envelope for relayed events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskflow_core::events::realtime::{RealtimeEvent, RelayPayload};
use taskflow_core::types::channel::Channel;

/// One published event as seen by subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayEnvelope {
    /// Channel name, e.g. `user-{id}`.
    pub channel: String,
    /// Event name.
    pub event: RealtimeEvent,
    /// Ids-only hint.
    pub payload: RelayPayload,
    /// When the relay accepted the event.
    pub sent_at: DateTime<Utc>,
}

impl RelayEnvelope {
    /// Wrap an event for `channel`.
    pub fn new(channel: &Channel, event: RealtimeEvent, payload: RelayPayload) -> Self {
        Self {
            channel: channel.name(),
            event,
            payload,
            sent_at: Utc::now(),
        }
    }

    /// JSON text form sent to WebSocket clients and Redis.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
