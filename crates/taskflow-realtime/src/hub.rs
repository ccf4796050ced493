//! Relay selection from configuration.

use std::sync::Arc;

use tracing::info;

use taskflow_core::config::{RealtimeBackend, RealtimeConfig};
use taskflow_core::error::AppError;
use taskflow_core::traits::relay::RealtimeRelay;

use crate::bridge::{DisabledRelay, MemoryPubSub, RedisPubSubBridge};

/// The configured relay plus, for the memory backend, the pub/sub that local
/// WebSocket clients subscribe to.
#[derive(Debug, Clone)]
pub struct RealtimeHub {
    relay: Arc<dyn RealtimeRelay>,
    local: Option<Arc<MemoryPubSub>>,
}

impl RealtimeHub {
    /// Builds the relay named by `config.backend`.
    pub fn from_config(config: &RealtimeConfig) -> Result<Self, AppError> {
        let hub = match config.backend {
            RealtimeBackend::Memory => {
                Self::memory(Arc::new(MemoryPubSub::new(config.channel_buffer_size)))
            }
            RealtimeBackend::Redis => {
                let url = config.redis_url.as_deref().ok_or_else(|| {
                    AppError::configuration("realtime.redis_url is required for the redis backend")
                })?;
                Self {
                    relay: Arc::new(RedisPubSubBridge::new(url)?),
                    local: None,
                }
            }
            RealtimeBackend::Disabled => Self {
                relay: Arc::new(DisabledRelay),
                local: None,
            },
        };

        info!(backend = hub.relay.backend_name(), "Realtime relay ready");
        Ok(hub)
    }

    /// Hub backed by an existing in-memory pub/sub.
    pub fn memory(pubsub: Arc<MemoryPubSub>) -> Self {
        Self {
            relay: pubsub.clone(),
            local: Some(pubsub),
        }
    }

    /// The relay handed to the notification engine.
    pub fn relay(&self) -> Arc<dyn RealtimeRelay> {
        self.relay.clone()
    }

    /// Local pub/sub for WebSocket subscriptions, when the backend has one.
    pub fn local_pubsub(&self) -> Option<Arc<MemoryPubSub>> {
        self.local.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_exposes_local_pubsub() {
        let hub = RealtimeHub::from_config(&RealtimeConfig::default()).unwrap();
        assert_eq!(hub.relay().backend_name(), "memory");
        assert!(hub.local_pubsub().is_some());
    }

    #[test]
    fn test_disabled_backend() {
        let config = RealtimeConfig {
            backend: RealtimeBackend::Disabled,
            ..Default::default()
        };
        let hub = RealtimeHub::from_config(&config).unwrap();
        assert_eq!(hub.relay().backend_name(), "disabled");
        assert!(hub.local_pubsub().is_none());
    }

    #[test]
    fn test_redis_backend_without_url_fails() {
        let config = RealtimeConfig {
            backend: RealtimeBackend::Redis,
            ..Default::default()
        };
        assert!(RealtimeHub::from_config(&config).is_err());
    }
}
