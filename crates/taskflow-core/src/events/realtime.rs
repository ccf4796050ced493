//! Realtime event names and the lightweight hint payload they carry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::id::{MessageId, NotificationId, ProjectId, TaskId};

/// Event names published on realtime channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RealtimeEvent {
    /// A notification was stored for the channel's user.
    #[serde(rename = "new-notification")]
    NewNotification,
    /// A chat message was posted in the channel's project.
    #[serde(rename = "new-message")]
    NewMessage,
}

impl RealtimeEvent {
    /// Wire name of the event.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewNotification => "new-notification",
            Self::NewMessage => "new-message",
        }
    }
}

impl fmt::Display for RealtimeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hint sent to connected clients so they can refetch without polling.
///
/// Only ids and the minimum needed for optimistic display are included,
/// never the stored notification row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayPayload {
    /// Stored notification this hint refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<NotificationId>,
    /// Task the event concerns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    /// Project the event belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    /// Chat message the event concerns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<MessageId>,
    /// Notification type, e.g. `task_assigned`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Short title for optimistic display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Rendered message for optimistic display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
