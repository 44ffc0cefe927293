//! Workspace repository implementation.

use sqlx::PgPool;

use teamhub_core::error::{AppError, ErrorKind};
use teamhub_core::result::AppResult;
use teamhub_entity::workspace::{CreateWorkspace, Workspace, WorkspaceMember, WorkspaceRole};

/// Repository for workspaces and their memberships.
#[derive(Debug, Clone)]
pub struct WorkspaceRepository {
    pool: PgPool,
}

impl WorkspaceRepository {
    /// Create a new workspace repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a workspace by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Workspace>> {
        sqlx::query_as::<_, Workspace>("SELECT * FROM workspaces WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find workspace", e))
    }

    /// Create a workspace and its owner membership in one transaction.
    pub async fn create(&self, data: &CreateWorkspace) -> AppResult<Workspace> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let workspace = sqlx::query_as::<_, Workspace>(
            "INSERT INTO workspaces (name, description, owner_id) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.owner_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create workspace", e))?;

        sqlx::query(
            "INSERT INTO workspace_members (workspace_id, user_id, role) VALUES ($1, $2, 'admin')",
        )
        .bind(workspace.id)
        .bind(data.owner_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to add owner membership", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit workspace", e)
        })?;

        Ok(workspace)
    }

    /// List workspaces the user is a member of.
    pub async fn find_by_member(&self, user_id: i64) -> AppResult<Vec<Workspace>> {
        sqlx::query_as::<_, Workspace>(
            "SELECT w.* FROM workspaces w \
             JOIN workspace_members m ON m.workspace_id = w.id \
             WHERE m.user_id = $1 ORDER BY w.created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list workspaces", e))
    }

    /// Find a membership record.
    pub async fn find_member(
        &self,
        workspace_id: i64,
        user_id: i64,
    ) -> AppResult<Option<WorkspaceMember>> {
        sqlx::query_as::<_, WorkspaceMember>(
            "SELECT * FROM workspace_members WHERE workspace_id = $1 AND user_id = $2",
        )
        .bind(workspace_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find membership", e))
    }

    /// Add a member. Adding an existing member is a conflict.
    pub async fn add_member(
        &self,
        workspace_id: i64,
        user_id: i64,
        role: WorkspaceRole,
    ) -> AppResult<WorkspaceMember> {
        sqlx::query_as::<_, WorkspaceMember>(
            "INSERT INTO workspace_members (workspace_id, user_id, role) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(workspace_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("User is already a member of this workspace")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to add member", e)
            }
        })
    }

    /// List the user ids of every member of a workspace.
    pub async fn member_user_ids(&self, workspace_id: i64) -> AppResult<Vec<i64>> {
        sqlx::query_scalar::<_, i64>(
            "SELECT user_id FROM workspace_members WHERE workspace_id = $1",
        )
        .bind(workspace_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list members", e))
    }
}

/// Whether a sqlx error is a PostgreSQL unique-constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}
