//! Store traits for notifications and mentions.
//!
//! The service layer only talks to these traits; PostgreSQL repositories and
//! in-memory stores implement them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use taskflow_core::result::AppResult;
use taskflow_core::types::id::{MessageId, NotificationId, UserId};
use taskflow_entity::mention::Mention;
use taskflow_entity::notification::Notification;

/// Durable notification storage.
#[async_trait]
pub trait NotificationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist one notification and return it as stored.
    async fn create(&self, notification: &Notification) -> AppResult<Notification>;

    /// All notifications owned by `user_id`, newest first.
    async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<Notification>>;

    /// Number of unread notifications owned by `user_id`.
    async fn count_unread(&self, user_id: UserId) -> AppResult<i64>;

    /// Mark one notification read if it is owned by `user_id`.
    ///
    /// Returns `false` when no notification with that id belongs to the user.
    /// An already-read notification returns `true` and keeps its `read_at`.
    async fn mark_read(
        &self,
        id: NotificationId,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Mark every unread notification of `user_id` read; returns how many
    /// changed.
    async fn mark_all_read(&self, user_id: UserId, at: DateTime<Utc>) -> AppResult<u64>;
}

/// Append-only mention storage.
#[async_trait]
pub trait MentionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist all mentions of one message; returns how many were stored.
    async fn create_many(&self, mentions: &[Mention]) -> AppResult<u64>;

    /// Mentions recorded for a message.
    async fn find_by_message(&self, message_id: MessageId) -> AppResult<Vec<Mention>>;
}
