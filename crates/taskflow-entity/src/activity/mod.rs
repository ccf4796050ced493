//! Action descriptors for content-producing events.

pub mod context;
pub mod status;

pub use context::{ActionContext, ActionKind, StatusTransition};
pub use status::TaskStatus;
