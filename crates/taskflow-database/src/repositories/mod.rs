//! PostgreSQL repository implementations of the store traits.

pub mod mention;
pub mod notification;

pub use mention::MentionRepository;
pub use notification::NotificationRepository;
