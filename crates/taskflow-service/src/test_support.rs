//! Test doubles shared by the service unit tests.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use taskflow_core::error::AppError;
use taskflow_core::events::realtime::{RealtimeEvent, RelayPayload};
use taskflow_core::result::AppResult;
use taskflow_core::traits::relay::RealtimeRelay;
use taskflow_core::types::channel::Channel;
use taskflow_core::types::id::{MessageId, NotificationId, UserId};
use taskflow_database::memory::MemoryNotificationStore;
use taskflow_database::store::{MentionStore, NotificationStore};
use taskflow_entity::mention::Mention;
use taskflow_entity::notification::Notification;

/// One captured publish call.
#[derive(Debug, Clone)]
pub struct Published {
    pub channel: Channel,
    pub event: RealtimeEvent,
    pub payload: RelayPayload,
}

/// Relay that remembers everything published to it.
#[derive(Debug, Default)]
pub struct RecordingRelay {
    published: Mutex<Vec<Published>>,
}

impl RecordingRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<Published> {
        self.published.lock().unwrap().clone()
    }

    pub fn on_channel(&self, channel: &Channel) -> Vec<Published> {
        self.published()
            .into_iter()
            .filter(|p| &p.channel == channel)
            .collect()
    }
}

#[async_trait]
impl RealtimeRelay for RecordingRelay {
    async fn publish(
        &self,
        channel: &Channel,
        event: RealtimeEvent,
        payload: &RelayPayload,
    ) -> AppResult<()> {
        self.published.lock().unwrap().push(Published {
            channel: *channel,
            event,
            payload: payload.clone(),
        });
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "recording"
    }
}

/// Relay whose transport is always down.
#[derive(Debug, Default)]
pub struct FailingRelay {
    attempts: AtomicUsize,
}

impl FailingRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RealtimeRelay for FailingRelay {
    async fn publish(
        &self,
        _channel: &Channel,
        _event: RealtimeEvent,
        _payload: &RelayPayload,
    ) -> AppResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(AppError::delivery_unavailable("relay transport unreachable"))
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

/// Notification store that rejects writes for selected owners.
#[derive(Debug, Default)]
pub struct FlakyNotificationStore {
    inner: MemoryNotificationStore,
    failing: HashSet<UserId>,
}

impl FlakyNotificationStore {
    pub fn failing_for(users: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            inner: MemoryNotificationStore::new(),
            failing: users.into_iter().collect(),
        }
    }

    pub fn inner(&self) -> &MemoryNotificationStore {
        &self.inner
    }
}

#[async_trait]
impl NotificationStore for FlakyNotificationStore {
    async fn create(&self, notification: &Notification) -> AppResult<Notification> {
        if self.failing.contains(&notification.user_id) {
            return Err(AppError::database("connection reset by peer"));
        }
        self.inner.create(notification).await
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<Notification>> {
        self.inner.find_by_user(user_id).await
    }

    async fn count_unread(&self, user_id: UserId) -> AppResult<i64> {
        self.inner.count_unread(user_id).await
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> AppResult<bool> {
        self.inner.mark_read(id, user_id, at).await
    }

    async fn mark_all_read(&self, user_id: UserId, at: DateTime<Utc>) -> AppResult<u64> {
        self.inner.mark_all_read(user_id, at).await
    }
}

/// Mention store that is always unavailable.
#[derive(Debug, Default)]
pub struct BrokenMentionStore;

#[async_trait]
impl MentionStore for BrokenMentionStore {
    async fn create_many(&self, _mentions: &[Mention]) -> AppResult<u64> {
        Err(AppError::database("mentions table locked"))
    }

    async fn find_by_message(&self, _message_id: MessageId) -> AppResult<Vec<Mention>> {
        Err(AppError::database("mentions table locked"))
    }
}
