//! Request DTOs with validation.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use taskflow_core::error::AppError;
use taskflow_core::types::id::{ProjectId, UserId};
use taskflow_entity::activity::{ActionContext, ActionKind, StatusTransition};
use taskflow_entity::project::{ProjectMember, ProjectMembership};

/// POST /api/activities
///
/// Sent by a task or chat mutation handler after it has committed the task
/// or message. The actor is always the authenticated caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordActivityRequest {
    /// What happened.
    pub kind: ActionKind,
    /// Project scope.
    pub project_id: ProjectId,
    /// Task or chat message id.
    pub subject_id: Uuid,
    /// Task title or message content.
    #[validate(length(min = 1, max = 10000))]
    pub subject_title_or_content: String,
    /// Current assignee.
    #[serde(default)]
    pub assignee_id: Option<UserId>,
    /// Assignee before an update.
    #[serde(default)]
    pub previous_assignee_id: Option<UserId>,
    /// Status change for `task_moved`.
    #[serde(default)]
    pub status_transition: Option<StatusTransition>,
    /// Optional explicit actor; must match the caller when present.
    #[serde(default)]
    pub actor_id: Option<UserId>,
    /// Project members, or absent when the project could not be found.
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub members: Option<Vec<ProjectMember>>,
}

impl RecordActivityRequest {
    /// Builds the action context and membership for `caller`.
    ///
    /// # Errors
    ///
    /// `Forbidden` when the body names an actor other than the caller.
    pub fn into_parts(
        self,
        caller: UserId,
    ) -> Result<(ActionContext, Option<ProjectMembership>), AppError> {
        if self.actor_id.is_some_and(|actor| actor != caller) {
            return Err(AppError::forbidden(
                "Activities can only be recorded for the authenticated user",
            ));
        }

        let context = ActionContext {
            actor_id: caller,
            project_id: self.project_id,
            kind: self.kind,
            subject_id: self.subject_id,
            subject_title_or_content: self.subject_title_or_content,
            assignee_id: self.assignee_id,
            previous_assignee_id: self.previous_assignee_id,
            status_transition: self.status_transition,
        };
        let membership = self
            .members
            .map(|members| ProjectMembership::new(self.project_id, members));

        Ok((context, membership))
    }
}

/// Query string of the realtime WebSocket route.
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeQuery {
    /// JWT access token (browsers cannot set headers on WebSocket upgrades).
    pub token: String,
    /// Comma-separated project ids whose chat channels to join.
    #[serde(default)]
    pub projects: Option<String>,
}

impl RealtimeQuery {
    /// Parses the requested project ids.
    pub fn project_ids(&self) -> Result<Vec<ProjectId>, AppError> {
        let Some(raw) = self.projects.as_deref() else {
            return Ok(Vec::new());
        };
        let mut ids = Vec::new();
        for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let id: ProjectId = part
                .parse()
                .map_err(|_| AppError::validation(format!("Invalid project id: {part}")))?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(ids)
    }
}
