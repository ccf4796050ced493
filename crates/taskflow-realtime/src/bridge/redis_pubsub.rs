//! Redis pub/sub bridge for multi-node deployments.

#[cfg(feature = "redis-pubsub")]
pub mod implementation {
    use async_trait::async_trait;
    use redis::aio::ConnectionManager;
    use tokio::sync::OnceCell;
    use tracing::{debug, info};

    use taskflow_core::error::{AppError, ErrorKind};
    use taskflow_core::events::realtime::{RealtimeEvent, RelayPayload};
    use taskflow_core::result::AppResult;
    use taskflow_core::traits::relay::RealtimeRelay;
    use taskflow_core::types::channel::Channel;

    use crate::message::envelope::RelayEnvelope;

    /// Publishes relay envelopes with Redis `PUBLISH`.
    ///
    /// The connection manager is created on first use and reconnects on its
    /// own after Redis restarts. A failed first connect is retried on the
    /// next publish.
    pub struct RedisPubSubBridge {
        client: redis::Client,
        connection: OnceCell<ConnectionManager>,
    }

    impl std::fmt::Debug for RedisPubSubBridge {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("RedisPubSubBridge")
                .field("connected", &self.connection.initialized())
                .finish()
        }
    }

    impl RedisPubSubBridge {
        /// Creates a new Redis pub/sub bridge.
        pub fn new(url: &str) -> AppResult<Self> {
            let client = redis::Client::open(url).map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, format!("Invalid Redis URL: {e}"), e)
            })?;
            info!("Redis realtime relay configured");
            Ok(Self {
                client,
                connection: OnceCell::new(),
            })
        }

        async fn connection(&self) -> AppResult<ConnectionManager> {
            self.connection
                .get_or_try_init(|| async {
                    ConnectionManager::new(self.client.clone())
                        .await
                        .map_err(|e| {
                            AppError::with_source(
                                ErrorKind::DeliveryUnavailable,
                                format!("Redis connection failed: {e}"),
                                e,
                            )
                        })
                })
                .await
                .cloned()
        }
    }

    #[async_trait]
    impl RealtimeRelay for RedisPubSubBridge {
        async fn publish(
            &self,
            channel: &Channel,
            event: RealtimeEvent,
            payload: &RelayPayload,
        ) -> AppResult<()> {
            let envelope = RelayEnvelope::new(channel, event, payload.clone());
            let message = envelope.to_json()?;
            let mut conn = self.connection().await?;

            let receivers = redis::cmd("PUBLISH")
                .arg(&envelope.channel)
                .arg(message)
                .query_async::<i64>(&mut conn)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::DeliveryUnavailable,
                        format!("Redis PUBLISH failed: {e}"),
                        e,
                    )
                })?;

            debug!(channel = %envelope.channel, event = %event, receivers, "Published to Redis");
            Ok(())
        }

        fn backend_name(&self) -> &'static str {
            "redis"
        }
    }

}

#[cfg(not(feature = "redis-pubsub"))]
pub mod implementation {
    use async_trait::async_trait;

    use taskflow_core::error::AppError;
    use taskflow_core::events::realtime::{RealtimeEvent, RelayPayload};
    use taskflow_core::result::AppResult;
    use taskflow_core::traits::relay::RealtimeRelay;
    use taskflow_core::types::channel::Channel;

    /// Stand-in when the `redis-pubsub` feature is disabled; every publish
    /// reports the transport as unavailable.
    #[derive(Debug, Clone)]
    pub struct RedisPubSubBridge;

    impl RedisPubSubBridge {
        /// Creates the stand-in bridge.
        pub fn new(_url: &str) -> AppResult<Self> {
            Ok(Self)
        }
    }

    #[async_trait]
    impl RealtimeRelay for RedisPubSubBridge {
        async fn publish(
            &self,
            _channel: &Channel,
            _event: RealtimeEvent,
            _payload: &RelayPayload,
        ) -> AppResult<()> {
            Err(AppError::delivery_unavailable(
                "Built without the redis-pubsub feature",
            ))
        }

        fn backend_name(&self) -> &'static str {
            "redis (unavailable)"
        }
    }
}

pub use implementation::RedisPubSubBridge;
