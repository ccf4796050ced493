//! Listing and acknowledging a user's notifications.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use taskflow_core::error::AppError;
use taskflow_core::types::id::NotificationId;
use taskflow_database::store::NotificationStore;
use taskflow_entity::notification::Notification;

use crate::context::RequestContext;

/// Read side of notifications, always scoped to the caller.
#[derive(Debug, Clone)]
pub struct NotificationInbox {
    /// Notification store.
    store: Arc<dyn NotificationStore>,
}

impl NotificationInbox {
    /// Creates a new inbox service.
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Lists the caller's notifications, newest first.
    pub async fn list_for_user(&self, ctx: &RequestContext) -> Result<Vec<Notification>, AppError> {
        self.store.find_by_user(ctx.user_id).await
    }

    /// Gets the caller's unread notification count.
    pub async fn unread_count(&self, ctx: &RequestContext) -> Result<i64, AppError> {
        self.store.count_unread(ctx.user_id).await
    }

    /// Marks one of the caller's notifications as read.
    ///
    /// A notification that does not exist and one owned by someone else are
    /// indistinguishable to the caller: both are `NotFound`. Marking an
    /// already-read notification succeeds and leaves it unchanged.
    pub async fn mark_as_read(
        &self,
        ctx: &RequestContext,
        notification_id: NotificationId,
    ) -> Result<(), AppError> {
        let found = self
            .store
            .mark_read(notification_id, ctx.user_id, Utc::now())
            .await?;

        if !found {
            return Err(AppError::not_found(format!(
                "Notification {notification_id} not found"
            )));
        }
        Ok(())
    }

    /// Marks every unread notification of the caller as read and returns how
    /// many changed.
    pub async fn mark_all_as_read(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        let changed = self.store.mark_all_read(ctx.user_id, Utc::now()).await?;
        info!(user_id = %ctx.user_id, changed, "Marked all notifications read");
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use taskflow_core::error::ErrorKind;
    use taskflow_core::types::id::{ProjectId, TaskId, UserId};
    use taskflow_database::memory::MemoryNotificationStore;
    use taskflow_entity::notification::NotificationPayload;

    use super::*;

    fn notification_for(user: UserId) -> Notification {
        Notification::new(
            user,
            Some(UserId::new()),
            "Task Updated",
            "Alice updated \"T\"",
            NotificationPayload::TaskUpdated {
                task_id: TaskId::new(),
                project_id: ProjectId::new(),
            },
        )
    }

    async fn inbox_with(
        notifications: &[Notification],
    ) -> (NotificationInbox, Arc<MemoryNotificationStore>) {
        let store = Arc::new(MemoryNotificationStore::new());
        for n in notifications {
            store.create(n).await.unwrap();
        }
        (NotificationInbox::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_list_is_owner_scoped_and_newest_first() {
        let owner = UserId::new();
        let mut older = notification_for(owner);
        older.created_at -= chrono::Duration::minutes(5);
        let newer = notification_for(owner);
        let foreign = notification_for(UserId::new());
        let (inbox, _) = inbox_with(&[older.clone(), foreign, newer.clone()]).await;

        let list = inbox
            .list_for_user(&RequestContext::new(owner, None))
            .await
            .unwrap();

        assert_eq!(
            list.iter().map(|n| n.id).collect::<Vec<_>>(),
            vec![newer.id, older.id]
        );
    }

    #[tokio::test]
    async fn test_mark_as_read_by_owner_is_idempotent() {
        let owner = UserId::new();
        let n = notification_for(owner);
        let (inbox, store) = inbox_with(std::slice::from_ref(&n)).await;
        let ctx = RequestContext::new(owner, None);

        inbox.mark_as_read(&ctx, n.id).await.unwrap();
        let first = store.get(n.id).unwrap();
        assert!(first.is_read);
        assert!(first.read_at.is_some());

        inbox.mark_as_read(&ctx, n.id).await.unwrap();
        assert_eq!(store.get(n.id).unwrap().read_at, first.read_at);
        assert_eq!(inbox.unread_count(&ctx).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_mark_as_read_by_other_user_is_not_found() {
        let owner = UserId::new();
        let n = notification_for(owner);
        let (inbox, store) = inbox_with(std::slice::from_ref(&n)).await;

        let err = inbox
            .mark_as_read(&RequestContext::new(UserId::new(), None), n.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(!store.get(n.id).unwrap().is_read);

        let err = inbox
            .mark_as_read(&RequestContext::new(owner, None), NotificationId::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_mark_all_as_read_counts_changes() {
        let owner = UserId::new();
        let other = UserId::new();
        let (inbox, _) = inbox_with(&[
            notification_for(owner),
            notification_for(owner),
            notification_for(other),
        ])
        .await;
        let ctx = RequestContext::new(owner, None);

        assert_eq!(inbox.unread_count(&ctx).await.unwrap(), 2);
        assert_eq!(inbox.mark_all_as_read(&ctx).await.unwrap(), 2);
        assert_eq!(inbox.mark_all_as_read(&ctx).await.unwrap(), 0);
        assert_eq!(inbox.unread_count(&ctx).await.unwrap(), 0);

        let other_ctx = RequestContext::new(other, None);
        assert_eq!(inbox.unread_count(&other_ctx).await.unwrap(), 1);
    }
}
