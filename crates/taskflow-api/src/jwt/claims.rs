//! JWT claims carried by access tokens.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskflow_core::types::id::{ProjectId, UserId};

/// JWT claims payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user ID.
    pub sub: Uuid,
    /// Display name, if the issuer includes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Issued-at timestamp (seconds since epoch).
    #[serde(default)]
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Projects whose realtime channel the holder may follow.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<Uuid>,
}

impl Claims {
    /// Claims for `user_id` valid for `ttl_seconds` from now.
    pub fn new(user_id: UserId, name: Option<String>, ttl_seconds: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user_id.into_uuid(),
            name,
            iat: now,
            exp: now + ttl_seconds,
            projects: Vec::new(),
        }
    }

    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.sub)
    }

    /// Whether the token lists `project`.
    pub fn grants_project(&self, project: ProjectId) -> bool {
        self.projects.contains(&project.into_uuid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projects_claim_is_optional() {
        let user = UserId::new();
        let json = serde_json::json!({ "sub": user.into_uuid(), "exp": 1 });
        let claims: Claims = serde_json::from_value(json).unwrap();
        assert!(claims.projects.is_empty());
        assert!(!claims.grants_project(ProjectId::new()));
    }

    #[test]
    fn test_grants_listed_project_only() {
        let (listed, other) = (ProjectId::new(), ProjectId::new());
        let claims = Claims {
            projects: vec![listed.into_uuid()],
            ..Claims::new(UserId::new(), None, 60)
        };
        assert!(claims.grants_project(listed));
        assert!(!claims.grants_project(other));
    }
}
