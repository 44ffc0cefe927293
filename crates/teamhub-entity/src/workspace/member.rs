//! Workspace membership entity and role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role of a user within a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceRole {
    /// Full control over the workspace.
    Admin,
    /// Regular member.
    Member,
}

impl std::fmt::Display for WorkspaceRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Member => write!(f, "member"),
        }
    }
}

/// Membership link between a user and a workspace.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkspaceMember {
    /// The workspace.
    pub workspace_id: i64,
    /// The member user.
    pub user_id: i64,
    /// The member's role.
    pub role: WorkspaceRole,
    /// When the user joined.
    pub joined_at: DateTime<Utc>,
}
