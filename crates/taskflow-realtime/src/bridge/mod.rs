//! Relay transports.

pub mod disabled;
pub mod memory_pubsub;
pub mod redis_pubsub;

pub use disabled::DisabledRelay;
pub use memory_pubsub::MemoryPubSub;
pub use redis_pubsub::RedisPubSubBridge;
