//! Notification inbox for the owning user.

pub mod service;

pub use service::NotificationInbox;
