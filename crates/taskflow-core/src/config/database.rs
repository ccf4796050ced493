//! PostgreSQL pool settings for the notification and mention tables.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Pool settings. Defaults match `config/default.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `postgres://` connection URL. Logged only with the password masked.
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connections kept open while idle.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// How long a request waits for a pooled connection before failing
    /// with a transient database error.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_seconds: u64,
    /// Idle connections above `min_connections` are closed after this long.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

impl DatabaseConfig {
    /// Checks the pool bounds and the URL scheme.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.url.starts_with("postgres://") || self.url.starts_with("postgresql://")) {
            return Err(AppError::configuration(
                "database.url must be a postgres:// URL",
            ));
        }
        if self.max_connections == 0 {
            return Err(AppError::configuration(
                "database.max_connections must be greater than zero",
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(AppError::configuration(format!(
                "database.min_connections ({}) exceeds database.max_connections ({})",
                self.min_connections, self.max_connections
            )));
        }
        Ok(())
    }
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_acquire_timeout() -> u64 {
    5
}

fn default_idle_timeout() -> u64 {
    600
}
