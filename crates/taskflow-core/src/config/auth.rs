//! Token verification configuration.

use serde::{Deserialize, Serialize};

/// Settings for verifying the bearer tokens issued by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret shared with the identity provider (HS256).
    pub jwt_secret: String,
    /// Allowed clock skew when validating `exp`, in seconds.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

fn default_leeway() -> u64 {
    5
}
