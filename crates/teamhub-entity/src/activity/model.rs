//! Activity log entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One entry in a workspace's activity feed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivityLog {
    /// Unique entry identifier.
    pub id: i64,
    /// The workspace the activity happened in; personal actions carry none.
    pub workspace_id: Option<i64>,
    /// The acting user.
    pub user_id: i64,
    /// Action category: CREATE, UPDATE, DELETE, UPLOAD, ATTACH, DETACH, SCHEDULE.
    pub action_type: String,
    /// Human-readable description of the action.
    pub content: String,
    /// When the action happened.
    pub created_at: DateTime<Utc>,
}
