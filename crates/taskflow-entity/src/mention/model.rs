//! Mention entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskflow_core::types::id::{MentionId, MessageId, UserId};

/// A resolved `@name` reference from a chat message to a user.
///
/// Append-only: created with or right after its parent message, never
/// updated, removed only when the message is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// Unique mention identifier.
    pub id: MentionId,
    /// Parent chat message.
    pub message_id: MessageId,
    /// Mentioned user.
    pub user_id: UserId,
    /// When the mention was recorded.
    pub created_at: DateTime<Utc>,
}

impl Mention {
    /// Creates a new mention of `user_id` in `message_id`.
    pub fn new(message_id: MessageId, user_id: UserId) -> Self {
        Self {
            id: MentionId::new(),
            message_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}
