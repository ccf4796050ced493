//! # taskflow-service
//!
//! The activity notification engine. Task and chat mutation handlers hand
//! an already-committed [`ActionContext`](taskflow_entity::ActionContext)
//! and the project's membership to [`ActivityEngine`], which:
//!
//! 1. resolves `@name` mentions in chat text ([`MentionResolver`])
//! 2. decides who is notified and how ([`RecipientSelector`])
//! 3. stores one notification per recipient ([`NotificationWriter`])
//! 4. pushes a best-effort realtime hint per recipient
//!
//! Owners read and acknowledge their notifications through
//! [`NotificationInbox`].
//!
//! Services follow constructor injection: stores and the relay are passed
//! in as `Arc` trait objects.

pub mod activity;
pub mod context;
pub mod notification;

#[cfg(test)]
pub(crate) mod test_support;

pub use activity::{
    ActivityEngine, ActivityOutcome, ActivityRequest, MentionResolution, MentionResolver,
    NotificationWriter, Recipient, RecipientSelector, WriteReport,
};
pub use context::RequestContext;
pub use notification::NotificationInbox;
