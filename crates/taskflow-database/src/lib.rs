//! # taskflow-database
//!
//! Persistence for the TaskFlow notification engine: the store traits the
//! service layer depends on, PostgreSQL repositories behind them, in-memory
//! stores for single-process use and tests, pool management, and
//! migrations.

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::{MemoryMentionStore, MemoryNotificationStore};
pub use repositories::{MentionRepository, NotificationRepository};
pub use store::{MentionStore, NotificationStore};
