//! In-memory pub/sub for single-node deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::sync::broadcast;
use tracing::trace;

use taskflow_core::events::realtime::{RealtimeEvent, RelayPayload};
use taskflow_core::result::AppResult;
use taskflow_core::traits::relay::RealtimeRelay;
use taskflow_core::types::channel::Channel;

use crate::message::envelope::RelayEnvelope;

/// In-memory pub/sub implementation.
#[derive(Debug)]
pub struct MemoryPubSub {
    /// Channel name → broadcast sender
    channels: RwLock<HashMap<String, broadcast::Sender<RelayEnvelope>>>,
    /// Buffer size for channels
    buffer_size: usize,
}

impl MemoryPubSub {
    /// Create a new in-memory pub/sub
    pub fn new(buffer_size: usize) -> Self {
        Self {
            channels: RwLock::new(HashMap::new()),
            buffer_size: buffer_size.max(1),
        }
    }

    /// Subscribe to a channel, returns a receiver
    pub async fn subscribe(&self, channel: &Channel) -> broadcast::Receiver<RelayEnvelope> {
        let mut channels = self.channels.write().await;
        let tx = channels
            .entry(channel.name())
            .or_insert_with(|| broadcast::channel(self.buffer_size).0);
        tx.subscribe()
    }

    /// Drop channels nobody listens to any more. Returns how many were removed.
    pub async fn prune_idle(&self) -> usize {
        let mut channels = self.channels.write().await;
        let before = channels.len();
        channels.retain(|_, tx| tx.receiver_count() > 0);
        before - channels.len()
    }
}

#[async_trait]
impl RealtimeRelay for MemoryPubSub {
    async fn publish(
        &self,
        channel: &Channel,
        event: RealtimeEvent,
        payload: &RelayPayload,
    ) -> AppResult<()> {
        let name = channel.name();
        let channels = self.channels.read().await;
        match channels.get(&name) {
            Some(tx) => {
                // No live receivers is not a failure for a best-effort hint.
                let delivered = tx
                    .send(RelayEnvelope::new(channel, event, payload.clone()))
                    .unwrap_or(0);
                trace!(channel = %name, event = %event, delivered, "Published");
            }
            None => trace!(channel = %name, event = %event, "No subscribers"),
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
