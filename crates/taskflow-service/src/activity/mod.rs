//! The activity notification pipeline.

pub mod engine;
pub mod format;
pub mod mention;
pub mod recipients;
pub mod writer;

pub use engine::{ActivityEngine, ActivityOutcome, ActivityRequest};
pub use mention::{MentionResolution, MentionResolver};
pub use recipients::{Recipient, RecipientSelector};
pub use writer::{NotificationWriter, WriteReport};
