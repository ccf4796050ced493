//! In-memory stores for single-process deployments and tests.

pub mod store;

pub use store::{MemoryMentionStore, MemoryNotificationStore};
