//! Realtime channel naming.
//!
//! Channel names are derived deterministically from ids so that clients can
//! subscribe without asking the server: `user-{id}` carries personal
//! notification events, `project-{id}` carries project-wide chat events.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::{ProjectId, UserId};

/// Typed realtime channel identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Channel {
    /// Personal channel of one user.
    User(UserId),
    /// Project-wide channel.
    Project(ProjectId),
}

impl Channel {
    /// Converts to the wire channel name.
    pub fn name(&self) -> String {
        match self {
            Channel::User(id) => format!("user-{id}"),
            Channel::Project(id) => format!("project-{id}"),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
