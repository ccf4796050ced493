//! # taskflow-realtime
//!
//! Realtime relays for TaskFlow. Every relay implements
//! [`taskflow_core::traits::RealtimeRelay`] and is strictly best-effort:
//!
//! - [`MemoryPubSub`]: in-process broadcast channels, single node, feeds the
//!   WebSocket route
//! - [`RedisPubSubBridge`]: Redis `PUBLISH` for multi-node deployments
//!   (feature `redis-pubsub`)
//! - [`DisabledRelay`]: drops everything; clients poll the inbox

pub mod bridge;
pub mod hub;
pub mod message;

pub use bridge::{DisabledRelay, MemoryPubSub, RedisPubSubBridge};
pub use hub::RealtimeHub;
pub use message::envelope::RelayEnvelope;
