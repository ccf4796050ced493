//! Notification type enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type of a stored notification, used for display and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// A task was created in one of the recipient's projects.
    TaskCreated,
    /// A task in one of the recipient's projects was edited.
    TaskUpdated,
    /// The recipient was assigned a task.
    TaskAssigned,
    /// A task was reassigned to the recipient.
    TaskReassigned,
    /// A task changed status.
    TaskMoved,
    /// A chat message was posted in one of the recipient's projects.
    ChatMessage,
    /// The recipient was mentioned in a chat message.
    ChatMention,
}

impl NotificationType {
    /// Return the type as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaskCreated => "task_created",
            Self::TaskUpdated => "task_updated",
            Self::TaskAssigned => "task_assigned",
            Self::TaskReassigned => "task_reassigned",
            Self::TaskMoved => "task_moved",
            Self::ChatMessage => "chat_message",
            Self::ChatMention => "chat_mention",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "task_created" => Ok(Self::TaskCreated),
            "task_updated" => Ok(Self::TaskUpdated),
            "task_assigned" => Ok(Self::TaskAssigned),
            "task_reassigned" => Ok(Self::TaskReassigned),
            "task_moved" => Ok(Self::TaskMoved),
            "chat_message" => Ok(Self::ChatMessage),
            "chat_mention" => Ok(Self::ChatMention),
            other => Err(format!("Unknown notification type: {other}")),
        }
    }
}
