//! Typed notification payloads.
//!
//! Each notification type has a fixed payload shape holding the ids a client
//! needs to deep-link. The serialized form is tagged with `type`, so the
//! stored `data` column is self-describing.

use serde::{Deserialize, Serialize};

use taskflow_core::events::realtime::RelayPayload;
use taskflow_core::types::id::{MessageId, ProjectId, TaskId};

use crate::activity::TaskStatus;

use super::kind::NotificationType;

/// Structured data attached to a notification, keyed by its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum NotificationPayload {
    /// See [`NotificationType::TaskCreated`].
    TaskCreated {
        task_id: TaskId,
        project_id: ProjectId,
    },
    /// See [`NotificationType::TaskUpdated`].
    TaskUpdated {
        task_id: TaskId,
        project_id: ProjectId,
    },
    /// See [`NotificationType::TaskAssigned`].
    TaskAssigned {
        task_id: TaskId,
        project_id: ProjectId,
    },
    /// See [`NotificationType::TaskReassigned`].
    TaskReassigned {
        task_id: TaskId,
        project_id: ProjectId,
    },
    /// See [`NotificationType::TaskMoved`].
    TaskMoved {
        task_id: TaskId,
        project_id: ProjectId,
        from: TaskStatus,
        to: TaskStatus,
    },
    /// See [`NotificationType::ChatMessage`].
    ChatMessage {
        message_id: MessageId,
        project_id: ProjectId,
    },
    /// See [`NotificationType::ChatMention`].
    ChatMention {
        message_id: MessageId,
        project_id: ProjectId,
    },
}

impl NotificationPayload {
    /// Notification type this payload belongs to.
    pub fn kind(&self) -> NotificationType {
        match self {
            Self::TaskCreated { .. } => NotificationType::TaskCreated,
            Self::TaskUpdated { .. } => NotificationType::TaskUpdated,
            Self::TaskAssigned { .. } => NotificationType::TaskAssigned,
            Self::TaskReassigned { .. } => NotificationType::TaskReassigned,
            Self::TaskMoved { .. } => NotificationType::TaskMoved,
            Self::ChatMessage { .. } => NotificationType::ChatMessage,
            Self::ChatMention { .. } => NotificationType::ChatMention,
        }
    }

    /// Project the notification belongs to.
    pub fn project_id(&self) -> ProjectId {
        match self {
            Self::TaskCreated { project_id, .. }
            | Self::TaskUpdated { project_id, .. }
            | Self::TaskAssigned { project_id, .. }
            | Self::TaskReassigned { project_id, .. }
            | Self::TaskMoved { project_id, .. }
            | Self::ChatMessage { project_id, .. }
            | Self::ChatMention { project_id, .. } => *project_id,
        }
    }

    /// Task the notification refers to, if any.
    pub fn task_id(&self) -> Option<TaskId> {
        match self {
            Self::TaskCreated { task_id, .. }
            | Self::TaskUpdated { task_id, .. }
            | Self::TaskAssigned { task_id, .. }
            | Self::TaskReassigned { task_id, .. }
            | Self::TaskMoved { task_id, .. } => Some(*task_id),
            Self::ChatMessage { .. } | Self::ChatMention { .. } => None,
        }
    }

    /// Chat message the notification refers to, if any.
    pub fn message_id(&self) -> Option<MessageId> {
        match self {
            Self::ChatMessage { message_id, .. } | Self::ChatMention { message_id, .. } => {
                Some(*message_id)
            }
            _ => None,
        }
    }

    /// Ids-only realtime hint for this payload.
    pub fn to_relay_payload(&self) -> RelayPayload {
        RelayPayload {
            task_id: self.task_id(),
            project_id: Some(self.project_id()),
            message_id: self.message_id(),
            kind: Some(self.kind().as_str().to_string()),
            ..Default::default()
        }
    }
}
