//! Project member entities.

use serde::{Deserialize, Serialize};

use taskflow_core::types::id::{ProjectId, UserId};

/// One member of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    /// Member's user id.
    pub user_id: UserId,
    /// Display name, matched exactly by `@name` mentions.
    pub display_name: String,
}

impl ProjectMember {
    /// Creates a member entry.
    pub fn new(user_id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
        }
    }
}

/// Full membership list of one project, fetched by the caller before the
/// engine runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMembership {
    /// Project the list belongs to.
    pub project_id: ProjectId,
    /// All members, including the actor.
    pub members: Vec<ProjectMember>,
}

impl ProjectMembership {
    /// Creates a membership list.
    pub fn new(project_id: ProjectId, members: Vec<ProjectMember>) -> Self {
        Self {
            project_id,
            members,
        }
    }

    /// Whether `user_id` belongs to the project.
    pub fn contains(&self, user_id: UserId) -> bool {
        self.members.iter().any(|m| m.user_id == user_id)
    }

    /// Member ids in list order, without duplicates.
    pub fn member_ids(&self) -> Vec<UserId> {
        let mut ids: Vec<UserId> = Vec::with_capacity(self.members.len());
        for member in &self.members {
            if !ids.contains(&member.user_id) {
                ids.push(member.user_id);
            }
        }
        ids
    }
}
