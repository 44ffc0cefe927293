//! Activity log repository implementation.

use sqlx::PgPool;

use teamhub_core::error::{AppError, ErrorKind};
use teamhub_core::result::AppResult;
use teamhub_entity::activity::ActivityLog;

/// Repository for workspace activity feed entries.
#[derive(Debug, Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    /// Create a new activity repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append an activity entry.
    pub async fn create(
        &self,
        workspace_id: Option<i64>,
        user_id: i64,
        action_type: &str,
        content: &str,
    ) -> AppResult<ActivityLog> {
        sqlx::query_as::<_, ActivityLog>(
            "INSERT INTO activity_logs (workspace_id, user_id, action_type, content) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(workspace_id)
        .bind(user_id)
        .bind(action_type)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to log activity", e))
    }

    /// Most recent activity of a workspace.
    pub async fn find_by_workspace(
        &self,
        workspace_id: i64,
        limit: i64,
    ) -> AppResult<Vec<ActivityLog>> {
        sqlx::query_as::<_, ActivityLog>(
            "SELECT * FROM activity_logs WHERE workspace_id = $1 \
             ORDER BY created_at DESC LIMIT $2",
        )
        .bind(workspace_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list activity", e))
    }
}
