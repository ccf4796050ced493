//! Durable notification writes.

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use taskflow_core::error::AppError;
use taskflow_core::result::AppResult;
use taskflow_core::types::id::UserId;
use taskflow_database::store::NotificationStore;
use taskflow_entity::notification::{Notification, NotificationType};

use super::recipients::Recipient;

/// A recipient whose notification could not be stored.
#[derive(Debug, Clone)]
pub struct FailedWrite {
    /// Intended owner.
    pub user_id: UserId,
    /// Intended type.
    pub notification_type: NotificationType,
    /// Why the store refused it.
    pub error: AppError,
}

/// Outcome of writing a batch of recipients.
#[derive(Debug, Clone, Default)]
pub struct WriteReport {
    /// Stored notifications, in recipient order.
    pub created: Vec<Notification>,
    /// Recipients that were skipped.
    pub failed: Vec<FailedWrite>,
}

impl WriteReport {
    /// Whether every recipient was stored.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Persists one notification per recipient.
///
/// Has no realtime side effects.
#[derive(Debug, Clone)]
pub struct NotificationWriter {
    /// Notification store.
    store: Arc<dyn NotificationStore>,
}

impl NotificationWriter {
    /// Creates a writer over `store`.
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Stores the notification for a single recipient.
    pub async fn write_one(&self, actor_id: UserId, recipient: &Recipient) -> AppResult<Notification> {
        let notification = recipient.to_notification(actor_id);
        let stored = self.store.create(&notification).await?;

        tracing::debug!(
            notification_id = %stored.id,
            user_id = %stored.user_id,
            notification_type = %stored.kind,
            "Notification stored"
        );

        Ok(stored)
    }

    /// Stores one notification per recipient, at most `concurrency` writes
    /// in flight.
    ///
    /// Each write stands alone: a failure is logged and recorded, and the
    /// remaining recipients are still attempted. Nothing already stored is
    /// rolled back. Both lists in the report keep recipient order.
    pub async fn write_all(
        &self,
        actor_id: UserId,
        recipients: Vec<Recipient>,
        concurrency: usize,
    ) -> WriteReport {
        let mut results: Vec<(usize, Recipient, AppResult<Notification>)> =
            stream::iter(recipients.into_iter().enumerate())
                .map(move |(index, recipient)| async move {
                    let result = self.write_one(actor_id, &recipient).await;
                    (index, recipient, result)
                })
                .buffer_unordered(concurrency.max(1))
                .collect()
                .await;
        results.sort_by_key(|(index, _, _)| *index);

        let mut report = WriteReport::default();
        for (_, recipient, result) in results {
            match result {
                Ok(notification) => report.created.push(notification),
                Err(e) => {
                    tracing::error!(
                        user_id = %recipient.user_id,
                        notification_type = %recipient.notification_type,
                        error = %e,
                        "Failed to store notification, skipping recipient"
                    );
                    report.failed.push(FailedWrite {
                        user_id: recipient.user_id,
                        notification_type: recipient.notification_type,
                        error: e,
                    });
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use taskflow_core::error::ErrorKind;
    use taskflow_core::types::id::ProjectId;
    use taskflow_database::memory::MemoryNotificationStore;
    use taskflow_entity::activity::ActionContext;
    use taskflow_entity::project::{ProjectMember, ProjectMembership};
    use uuid::Uuid;

    use super::*;
    use crate::activity::mention::MentionResolution;
    use crate::activity::recipients::RecipientSelector;
    use crate::test_support::FlakyNotificationStore;

    fn recipients(actor: UserId, others: &[UserId]) -> Vec<Recipient> {
        let project = ProjectId::new();
        let mut members = vec![ProjectMember::new(actor, "Actor")];
        members.extend(others.iter().map(|id| ProjectMember::new(*id, "Member")));
        let membership = ProjectMembership::new(project, members);
        let ctx = ActionContext::chat_message(actor, project, Uuid::new_v4(), "hello");
        RecipientSelector::new()
            .select(&ctx, Some(&membership), &MentionResolution::default())
            .unwrap()
    }

    #[tokio::test]
    async fn test_write_all_creates_unread_rows() {
        let store = Arc::new(MemoryNotificationStore::new());
        let writer = NotificationWriter::new(store.clone());
        let actor = UserId::new();
        let list = recipients(actor, &[UserId::new(), UserId::new()]);

        let report = writer.write_all(actor, list, 4).await;

        assert!(report.is_complete());
        assert_eq!(report.created.len(), 2);
        assert_eq!(store.len(), 2);
        assert!(report.created.iter().all(|n| !n.is_read));
        assert!(report.created.iter().all(|n| n.actor_id == Some(actor)));
    }

    #[tokio::test]
    async fn test_failed_write_does_not_stop_the_batch() {
        let (b, c, d) = (UserId::new(), UserId::new(), UserId::new());
        let store = Arc::new(FlakyNotificationStore::failing_for([c]));
        let writer = NotificationWriter::new(store.clone());
        let actor = UserId::new();

        let report = writer.write_all(actor, recipients(actor, &[b, c, d]), 1).await;

        assert_eq!(report.created.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].user_id, c);
        assert_eq!(report.failed[0].error.kind, ErrorKind::Database);
        assert_eq!(store.inner().len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_writes_keep_recipient_order() {
        let others: Vec<UserId> = (0..8).map(|_| UserId::new()).collect();
        let store = Arc::new(FlakyNotificationStore::failing_for([others[2], others[5]]));
        let writer = NotificationWriter::new(store.clone());
        let actor = UserId::new();

        let report = writer.write_all(actor, recipients(actor, &others), 8).await;

        let created: Vec<UserId> = report.created.iter().map(|n| n.user_id).collect();
        let expected: Vec<UserId> = others
            .iter()
            .copied()
            .filter(|id| *id != others[2] && *id != others[5])
            .collect();
        assert_eq!(created, expected);
        let failed: Vec<UserId> = report.failed.iter().map(|f| f.user_id).collect();
        assert_eq!(failed, vec![others[2], others[5]]);
    }

    #[tokio::test]
    async fn test_empty_recipient_list() {
        let writer = NotificationWriter::new(Arc::new(MemoryNotificationStore::new()));
        let report = writer.write_all(UserId::new(), Vec::new(), 4).await;
        assert!(report.created.is_empty());
        assert!(report.is_complete());
    }
}
