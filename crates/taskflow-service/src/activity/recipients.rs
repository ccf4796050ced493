//! Recipient selection.
//!
//! Decides who hears about an action and with which notification type. Each
//! action has at most a *primary* audience (the assignee, or mentioned users)
//! who get a targeted notification, and a *general* audience (every other
//! member) who get the broad one. The two never overlap and never include
//! the actor.

use taskflow_core::error::AppError;
use taskflow_core::result::AppResult;
use taskflow_core::types::id::{MessageId, TaskId, UserId};
use taskflow_entity::activity::{ActionContext, ActionKind, StatusTransition};
use taskflow_entity::notification::{Notification, NotificationPayload, NotificationType};
use taskflow_entity::project::ProjectMembership;

use super::format::{NotificationFormatter, Rendered};
use super::mention::MentionResolution;

/// Name used when the actor is not in the membership list.
const UNKNOWN_ACTOR: &str = "Someone";

/// One notification to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    /// Who receives it.
    pub user_id: UserId,
    /// Type, always equal to `payload.kind()`.
    pub notification_type: NotificationType,
    /// Rendered title.
    pub title: String,
    /// Rendered message.
    pub message: String,
    /// Deep-link payload.
    pub payload: NotificationPayload,
}

impl Recipient {
    fn new(user_id: UserId, rendered: Rendered, payload: NotificationPayload) -> Self {
        Self {
            user_id,
            notification_type: payload.kind(),
            title: rendered.title,
            message: rendered.message,
            payload,
        }
    }

    /// Builds the unread notification for this recipient.
    pub fn to_notification(&self, actor_id: UserId) -> Notification {
        Notification::new(
            self.user_id,
            Some(actor_id),
            self.title.clone(),
            self.message.clone(),
            self.payload.clone(),
        )
    }
}

/// Computes the recipient list for an action.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecipientSelector;

impl RecipientSelector {
    /// Creates a selector.
    pub fn new() -> Self {
        Self
    }

    /// Selects recipients for `ctx`.
    ///
    /// Primary recipients come first, then the general audience in
    /// membership order.
    ///
    /// # Errors
    ///
    /// `NotFound` when the membership is missing or belongs to another
    /// project; `Validation` when the action lacks a field its kind needs.
    pub fn select(
        &self,
        ctx: &ActionContext,
        membership: Option<&ProjectMembership>,
        mentions: &MentionResolution,
    ) -> AppResult<Vec<Recipient>> {
        let membership = match membership {
            Some(m) if m.project_id == ctx.project_id => m,
            _ => {
                return Err(AppError::not_found(format!(
                    "Project {} not found",
                    ctx.project_id
                )));
            }
        };

        let actor = actor_name(ctx, membership);
        let text = ctx.subject_title_or_content.as_str();

        let (primary, general): (Vec<Recipient>, Box<dyn Fn(UserId) -> Recipient + '_>) =
            match ctx.kind {
                ActionKind::TaskCreated
                | ActionKind::TaskUpdated
                | ActionKind::TaskAssigned
                | ActionKind::TaskReassigned => {
                    let task_id = TaskId::from_uuid(ctx.subject_id);
                    let project_id = ctx.project_id;
                    let primary = assignment_type(ctx)?
                        .and_then(|kind| assignee_target(ctx, membership).map(|id| (id, kind)))
                        .map(|(user_id, kind)| {
                            let (rendered, payload) = match kind {
                                NotificationType::TaskReassigned => (
                                    NotificationFormatter::task_reassigned(actor, text),
                                    NotificationPayload::TaskReassigned {
                                        task_id,
                                        project_id,
                                    },
                                ),
                                _ => (
                                    NotificationFormatter::task_assigned(actor, text),
                                    NotificationPayload::TaskAssigned {
                                        task_id,
                                        project_id,
                                    },
                                ),
                            };
                            Recipient::new(user_id, rendered, payload)
                        })
                        .into_iter()
                        .collect();

                    let created = ctx.kind == ActionKind::TaskCreated;
                    let general = move |user_id| {
                        if created {
                            Recipient::new(
                                user_id,
                                NotificationFormatter::task_created(actor, text),
                                NotificationPayload::TaskCreated {
                                    task_id,
                                    project_id,
                                },
                            )
                        } else {
                            Recipient::new(
                                user_id,
                                NotificationFormatter::task_updated(actor, text),
                                NotificationPayload::TaskUpdated {
                                    task_id,
                                    project_id,
                                },
                            )
                        }
                    };
                    (primary, Box::new(general))
                }
                ActionKind::TaskMoved => {
                    let transition = ctx.status_transition.ok_or_else(|| {
                        AppError::validation("task_moved action requires a status transition")
                    })?;
                    if !transition.is_change() {
                        tracing::debug!(
                            project_id = %ctx.project_id,
                            task_id = %ctx.subject_id,
                            "Status unchanged, no task_moved notifications"
                        );
                        return Ok(Vec::new());
                    }
                    let StatusTransition { from, to } = transition;

                    let payload = NotificationPayload::TaskMoved {
                        task_id: TaskId::from_uuid(ctx.subject_id),
                        project_id: ctx.project_id,
                        from,
                        to,
                    };
                    let primary = assignee_target(ctx, membership)
                        .map(|user_id| {
                            Recipient::new(
                                user_id,
                                NotificationFormatter::your_task_moved(actor, text, from, to),
                                payload.clone(),
                            )
                        })
                        .into_iter()
                        .collect();
                    let general = move |user_id| {
                        Recipient::new(
                            user_id,
                            NotificationFormatter::task_moved(actor, text, from, to),
                            payload.clone(),
                        )
                    };
                    (primary, Box::new(general))
                }
                ActionKind::ChatMessage | ActionKind::ChatMention => {
                    let message_id = MessageId::from_uuid(ctx.subject_id);
                    let project_id = ctx.project_id;
                    let primary = mentions
                        .user_ids
                        .iter()
                        .copied()
                        .filter(|id| *id != ctx.actor_id && membership.contains(*id))
                        .map(|user_id| {
                            Recipient::new(
                                user_id,
                                NotificationFormatter::chat_mention(actor, text),
                                NotificationPayload::ChatMention {
                                    message_id,
                                    project_id,
                                },
                            )
                        })
                        .collect();
                    let general = move |user_id| {
                        Recipient::new(
                            user_id,
                            NotificationFormatter::chat_message(actor, text),
                            NotificationPayload::ChatMessage {
                                message_id,
                                project_id,
                            },
                        )
                    };
                    (primary, Box::new(general))
                }
            };

        let mut recipients = primary;
        for user_id in membership.member_ids() {
            if user_id == ctx.actor_id || recipients.iter().any(|r| r.user_id == user_id) {
                continue;
            }
            recipients.push(general(user_id));
        }

        tracing::debug!(
            project_id = %ctx.project_id,
            kind = %ctx.kind,
            recipients = recipients.len(),
            "Selected notification recipients"
        );

        Ok(recipients)
    }
}

/// Display name of the actor within the project.
fn actor_name<'a>(ctx: &ActionContext, membership: &'a ProjectMembership) -> &'a str {
    membership
        .members
        .iter()
        .find(|m| m.user_id == ctx.actor_id)
        .map(|m| m.display_name.as_str())
        .unwrap_or(UNKNOWN_ACTOR)
}

/// Targeted notification type owed to the assignee of a task action.
fn assignment_type(ctx: &ActionContext) -> AppResult<Option<NotificationType>> {
    match ctx.kind {
        ActionKind::TaskCreated => Ok(ctx.assignee_id.map(|_| NotificationType::TaskAssigned)),
        ActionKind::TaskUpdated => Ok(match (ctx.previous_assignee_id, ctx.assignee_id) {
            (previous, Some(current)) if previous != Some(current) => Some(match previous {
                None => NotificationType::TaskAssigned,
                Some(_) => NotificationType::TaskReassigned,
            }),
            _ => None,
        }),
        ActionKind::TaskAssigned | ActionKind::TaskReassigned => {
            if ctx.assignee_id.is_none() {
                return Err(AppError::validation(format!(
                    "{} action requires an assignee",
                    ctx.kind
                )));
            }
            Ok(Some(if ctx.kind == ActionKind::TaskAssigned {
                NotificationType::TaskAssigned
            } else {
                NotificationType::TaskReassigned
            }))
        }
        _ => Ok(None),
    }
}

/// The assignee, if one is set, differs from the actor, and is a member.
fn assignee_target(ctx: &ActionContext, membership: &ProjectMembership) -> Option<UserId> {
    let assignee = ctx.assignee_id.filter(|id| *id != ctx.actor_id)?;
    if membership.contains(assignee) {
        Some(assignee)
    } else {
        tracing::debug!(
            project_id = %ctx.project_id,
            assignee_id = %assignee,
            "Assignee is not a project member, skipping targeted notification"
        );
        None
    }
}
