//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskflow_core::events::realtime::RelayPayload;
use taskflow_core::types::id::{NotificationId, UserId};

use super::kind::NotificationType;
use super::payload::NotificationPayload;

/// A durable notification owned by its recipient.
///
/// Starts unread; the only transition is unread → read, performed by the
/// owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The recipient (owner).
    pub user_id: UserId,
    /// The user whose action triggered this notification.
    pub actor_id: Option<UserId>,
    /// Notification type, always equal to `data.kind()`.
    #[serde(rename = "type")]
    pub kind: NotificationType,
    /// Notification title.
    pub title: String,
    /// Rendered body text.
    pub message: String,
    /// Deep-link payload.
    pub data: NotificationPayload,
    /// Whether the owner has read this notification.
    pub is_read: bool,
    /// When the notification was read.
    pub read_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates a new unread notification for `user_id`.
    pub fn new(
        user_id: UserId,
        actor_id: Option<UserId>,
        title: impl Into<String>,
        message: impl Into<String>,
        data: NotificationPayload,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            user_id,
            actor_id,
            kind: data.kind(),
            title: title.into(),
            message: message.into(),
            data,
            is_read: false,
            read_at: None,
            created_at: Utc::now(),
        }
    }

    /// Check if the notification has been read.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }

    /// Marks the notification read. Returns `true` if this changed it.
    pub fn mark_read(&mut self, at: DateTime<Utc>) -> bool {
        if self.is_read {
            return false;
        }
        self.is_read = true;
        self.read_at = Some(at);
        true
    }

    /// Realtime hint announcing this notification to its owner.
    pub fn relay_payload(&self) -> RelayPayload {
        RelayPayload {
            notification_id: Some(self.id),
            title: Some(self.title.clone()),
            message: Some(self.message.clone()),
            ..self.data.to_relay_payload()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskflow_core::types::id::{ProjectId, TaskId};

    fn sample() -> Notification {
        Notification::new(
            UserId::new(),
            Some(UserId::new()),
            "New Task Assigned",
            "You have been assigned to \"Ship it\"",
            NotificationPayload::TaskAssigned {
                task_id: TaskId::new(),
                project_id: ProjectId::new(),
            },
        )
    }

    #[test]
    fn test_new_is_unread_with_derived_kind() {
        let n = sample();
        assert!(n.is_unread());
        assert_eq!(n.kind, NotificationType::TaskAssigned);
        assert!(n.read_at.is_none());
    }

    #[test]
    fn test_mark_read_is_one_way() {
        let mut n = sample();
        let first = Utc::now();
        assert!(n.mark_read(first));
        assert!(!n.mark_read(Utc::now()));
        assert_eq!(n.read_at, Some(first));
        assert!(n.is_read);
    }

    #[test]
    fn test_relay_payload_has_display_fields() {
        let n = sample();
        let hint = n.relay_payload();
        assert_eq!(hint.notification_id, Some(n.id));
        assert_eq!(hint.title.as_deref(), Some("New Task Assigned"));
        assert_eq!(hint.kind.as_deref(), Some("task_assigned"));
        assert!(hint.task_id.is_some());
    }
}
