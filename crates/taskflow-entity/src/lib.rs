//! # taskflow-entity
//!
//! Domain entities for the TaskFlow activity notification engine: the
//! action descriptor handed in by task/chat mutation handlers, project
//! membership, mentions, and the durable notification record with its
//! typed payload.

pub mod activity;
pub mod mention;
pub mod notification;
pub mod project;

pub use activity::{ActionContext, ActionKind, StatusTransition, TaskStatus};
pub use mention::Mention;
pub use notification::{Notification, NotificationPayload, NotificationType};
pub use project::{ProjectMember, ProjectMembership};
