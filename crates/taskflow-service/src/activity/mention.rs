//! `@name` mention extraction and resolution.
//!
//! Tokens are matched against member display names by exact, case-sensitive
//! equality. The message text itself is never rewritten: unresolved tokens
//! simply stay in the content as typed.

use std::sync::LazyLock;

use regex::Regex;

use taskflow_core::types::id::UserId;
use taskflow_entity::project::ProjectMember;

/// `@` followed by one or more letters, digits, or underscores.
static MENTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@([A-Za-z0-9_]+)").expect("mention pattern is a valid regex")
});

/// Result of resolving the mentions in one piece of content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentionResolution {
    /// Distinct token bodies in first-seen order, without the `@`.
    pub tokens: Vec<String>,
    /// Resolved users, deduplicated, in token order.
    pub user_ids: Vec<UserId>,
}

impl MentionResolution {
    /// Whether at least one token resolved to a user.
    pub fn has_mentions(&self) -> bool {
        !self.user_ids.is_empty()
    }

    /// Whether `user_id` was mentioned.
    pub fn contains(&self, user_id: UserId) -> bool {
        self.user_ids.contains(&user_id)
    }
}

/// Stateless mention resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct MentionResolver;

impl MentionResolver {
    /// Creates a resolver.
    pub fn new() -> Self {
        Self
    }

    /// Extracts the distinct mention tokens from `content`.
    pub fn extract_mention_tokens(content: &str) -> Vec<String> {
        let mut tokens: Vec<String> = Vec::new();
        for capture in MENTION_PATTERN.captures_iter(content) {
            if let Some(body) = capture.get(1) {
                let body = body.as_str();
                if !tokens.iter().any(|t| t == body) {
                    tokens.push(body.to_string());
                }
            }
        }
        tokens
    }

    /// Resolves the mentions in `content` against `known_users`.
    ///
    /// A self-mention resolves like any other; excluding the actor is the
    /// recipient selector's job.
    pub fn resolve(&self, content: &str, known_users: &[ProjectMember]) -> MentionResolution {
        let tokens = Self::extract_mention_tokens(content);
        let mut user_ids: Vec<UserId> = Vec::new();

        for token in &tokens {
            let matched = known_users
                .iter()
                .filter(|member| member.display_name == *token)
                .map(|member| member.user_id);
            for user_id in matched {
                if !user_ids.contains(&user_id) {
                    user_ids.push(user_id);
                }
            }
        }

        tracing::debug!(
            tokens = tokens.len(),
            resolved = user_ids.len(),
            "Resolved mentions"
        );

        MentionResolution { tokens, user_ids }
    }
}
