//! Notification fan-out configuration.

use serde::{Deserialize, Serialize};

/// Settings for the activity notification pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// How many notification writes, and then how many relay publishes, may
    /// be in flight at once for one action. `1` handles recipients strictly
    /// one after another.
    #[serde(default = "default_fanout_concurrency")]
    pub fanout_concurrency: usize,
    /// Whether resolved chat mentions are stored as `Mention` rows.
    #[serde(default = "default_true")]
    pub persist_mentions: bool,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            fanout_concurrency: default_fanout_concurrency(),
            persist_mentions: true,
        }
    }
}

fn default_fanout_concurrency() -> usize {
    4
}

fn default_true() -> bool {
    true
}
