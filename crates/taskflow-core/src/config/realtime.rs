//! Realtime relay configuration.

use serde::{Deserialize, Serialize};

/// Which transport carries best-effort realtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RealtimeBackend {
    /// In-process broadcast channels (single node). Backs the WebSocket route.
    #[default]
    Memory,
    /// Redis `PUBLISH` (multi-node).
    Redis,
    /// No realtime delivery; clients poll the inbox.
    Disabled,
}

/// Realtime relay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Relay transport.
    #[serde(default)]
    pub backend: RealtimeBackend,
    /// Internal channel buffer size for broadcast channels.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
    /// Redis URL, required for the `redis` backend.
    #[serde(default)]
    pub redis_url: Option<String>,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            backend: RealtimeBackend::default(),
            channel_buffer_size: default_channel_buffer(),
            redis_url: None,
        }
    }
}

fn default_channel_buffer() -> usize {
    256
}
