//! Notification domain entities.

pub mod kind;
pub mod model;
pub mod payload;

pub use kind::NotificationType;
pub use model::Notification;
pub use payload::NotificationPayload;
