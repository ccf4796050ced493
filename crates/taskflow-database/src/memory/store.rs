//! In-memory notification and mention stores backed by `DashMap`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use taskflow_core::result::AppResult;
use taskflow_core::types::id::{MentionId, MessageId, NotificationId, UserId};
use taskflow_entity::mention::Mention;
use taskflow_entity::notification::Notification;

use crate::store::{MentionStore, NotificationStore};

/// Notification store held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotificationStore {
    rows: Arc<DashMap<NotificationId, Notification>>,
}

impl MemoryNotificationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored notifications across all users.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Snapshot of one notification.
    pub fn get(&self, id: NotificationId) -> Option<Notification> {
        self.rows.get(&id).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn create(&self, notification: &Notification) -> AppResult<Notification> {
        self.rows.insert(notification.id, notification.clone());
        debug!(id = %notification.id, user_id = %notification.user_id, "Stored notification");
        Ok(notification.clone())
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<Notification>> {
        let mut owned: Vec<Notification> = self
            .rows
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        owned.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(owned)
    }

    async fn count_unread(&self, user_id: UserId) -> AppResult<i64> {
        let count = self
            .rows
            .iter()
            .filter(|entry| entry.user_id == user_id && entry.is_unread())
            .count();
        Ok(count as i64)
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> AppResult<bool> {
        match self.rows.get_mut(&id) {
            Some(mut entry) if entry.user_id == user_id => {
                entry.mark_read(at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn mark_all_read(&self, user_id: UserId, at: DateTime<Utc>) -> AppResult<u64> {
        let mut changed = 0;
        for mut entry in self.rows.iter_mut() {
            if entry.user_id == user_id && entry.mark_read(at) {
                changed += 1;
            }
        }
        Ok(changed)
    }
}

/// Mention store held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryMentionStore {
    rows: Arc<DashMap<MentionId, Mention>>,
}

impl MemoryMentionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MentionStore for MemoryMentionStore {
    async fn create_many(&self, mentions: &[Mention]) -> AppResult<u64> {
        let mut stored = 0;
        for mention in mentions {
            let duplicate = self
                .rows
                .iter()
                .any(|m| m.message_id == mention.message_id && m.user_id == mention.user_id);
            if !duplicate {
                self.rows.insert(mention.id, mention.clone());
                stored += 1;
            }
        }
        Ok(stored)
    }

    async fn find_by_message(&self, message_id: MessageId) -> AppResult<Vec<Mention>> {
        let mut found: Vec<Mention> = self
            .rows
            .iter()
            .filter(|m| m.message_id == message_id)
            .map(|m| m.value().clone())
            .collect();
        found.sort_by_key(|m| m.created_at);
        Ok(found)
    }
}
