//! The per-invocation action descriptor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskflow_core::types::id::{ProjectId, UserId};

use super::status::TaskStatus;

/// Kind of content-producing action that may trigger notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// A task was created.
    TaskCreated,
    /// A task was edited.
    TaskUpdated,
    /// A task was given its first assignee.
    TaskAssigned,
    /// A task was moved from one assignee to another.
    TaskReassigned,
    /// A task changed status column.
    TaskMoved,
    /// A chat message was posted.
    ChatMessage,
    /// A chat message containing mentions was posted.
    ChatMention,
}

impl ActionKind {
    /// Return the kind as a string.
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

    /// Whether the subject of the action is a chat message.
    pub fn is_chat(&self) -> bool {
        matches!(self, Self::ChatMessage | Self::ChatMention)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
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
            other => Err(format!("Unknown action kind: {other}")),
        }
    }
}

/// Status change carried by a `task_moved` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTransition {
    /// Column the task left.
    pub from: TaskStatus,
    /// Column the task entered.
    pub to: TaskStatus,
}

impl StatusTransition {
    /// Whether the status actually changed.
    pub fn is_change(&self) -> bool {
        self.from != self.to
    }
}

/// Describes one already-committed action.
///
/// Constructed by the task/chat mutation handler after the task or message
/// is durably stored; never persisted itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionContext {
    /// Authenticated user who performed the action.
    pub actor_id: UserId,
    /// Project scope.
    pub project_id: ProjectId,
    /// What happened.
    pub kind: ActionKind,
    /// Task or chat message the action concerns.
    pub subject_id: Uuid,
    /// Task title or message content, used for message composition.
    pub subject_title_or_content: String,
    /// Current assignee, for task actions.
    #[serde(default)]
    pub assignee_id: Option<UserId>,
    /// Assignee before the action, for `task_updated`.
    #[serde(default)]
    pub previous_assignee_id: Option<UserId>,
    /// Status change, for `task_moved`.
    #[serde(default)]
    pub status_transition: Option<StatusTransition>,
}

impl ActionContext {
    fn base(
        kind: ActionKind,
        actor_id: UserId,
        project_id: ProjectId,
        subject_id: Uuid,
        text: impl Into<String>,
    ) -> Self {
        Self {
            actor_id,
            project_id,
            kind,
            subject_id,
            subject_title_or_content: text.into(),
            assignee_id: None,
            previous_assignee_id: None,
            status_transition: None,
        }
    }

    /// A task was created, optionally with an assignee.
    pub fn task_created(
        actor_id: UserId,
        project_id: ProjectId,
        task_id: Uuid,
        title: impl Into<String>,
        assignee_id: Option<UserId>,
    ) -> Self {
        Self {
            assignee_id,
            ..Self::base(ActionKind::TaskCreated, actor_id, project_id, task_id, title)
        }
    }

    /// A task was edited; the assignee pair lets the selector detect
    /// (re)assignment.
    pub fn task_updated(
        actor_id: UserId,
        project_id: ProjectId,
        task_id: Uuid,
        title: impl Into<String>,
        previous_assignee_id: Option<UserId>,
        assignee_id: Option<UserId>,
    ) -> Self {
        Self {
            assignee_id,
            previous_assignee_id,
            ..Self::base(ActionKind::TaskUpdated, actor_id, project_id, task_id, title)
        }
    }

    /// A task changed status.
    pub fn task_moved(
        actor_id: UserId,
        project_id: ProjectId,
        task_id: Uuid,
        title: impl Into<String>,
        from: TaskStatus,
        to: TaskStatus,
        assignee_id: Option<UserId>,
    ) -> Self {
        Self {
            assignee_id,
            status_transition: Some(StatusTransition { from, to }),
            ..Self::base(ActionKind::TaskMoved, actor_id, project_id, task_id, title)
        }
    }

    /// A chat message was posted.
    pub fn chat_message(
        actor_id: UserId,
        project_id: ProjectId,
        message_id: Uuid,
        content: impl Into<String>,
    ) -> Self {
        Self::base(ActionKind::ChatMessage, actor_id, project_id, message_id, content)
    }
}
