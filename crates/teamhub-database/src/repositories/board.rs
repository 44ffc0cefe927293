//! Board repository implementation — columns, cards, and their links.

use sqlx::PgPool;

use teamhub_core::error::{AppError, ErrorKind};
use teamhub_core::result::AppResult;
use teamhub_entity::board::{BoardColumn, Card, CardComment, CardDependency};

use super::workspace::is_unique_violation;

/// Repository for kanban columns, cards, dependencies, comments, and
/// card-level association records.
#[derive(Debug, Clone)]
pub struct BoardRepository {
    pool: PgPool,
}

impl BoardRepository {
    /// Create a new board repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ── Columns ──────────────────────────────────────────────────

    /// Find a column by ID.
    pub async fn find_column(&self, id: i64) -> AppResult<Option<BoardColumn>> {
        sqlx::query_as::<_, BoardColumn>("SELECT * FROM board_columns WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find column", e))
    }

    /// Create a column.
    pub async fn create_column(
        &self,
        project_id: i64,
        title: &str,
        position: i32,
    ) -> AppResult<BoardColumn> {
        sqlx::query_as::<_, BoardColumn>(
            "INSERT INTO board_columns (project_id, title, position) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(project_id)
        .bind(title)
        .bind(position)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create column", e))
    }

    /// Update a column record.
    pub async fn update_column(&self, column: &BoardColumn) -> AppResult<BoardColumn> {
        sqlx::query_as::<_, BoardColumn>(
            "UPDATE board_columns SET title = $2, position = $3 WHERE id = $1 RETURNING *",
        )
        .bind(column.id)
        .bind(&column.title)
        .bind(column.position)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update column", e))?
        .ok_or_else(|| AppError::not_found(format!("Column {} not found", column.id)))
    }

    /// Delete a column, detaching its cards first so they are archived
    /// rather than removed. Returns the number of detached cards.
    pub async fn delete_column(&self, id: i64) -> AppResult<u64> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let detached = sqlx::query("UPDATE cards SET column_id = NULL WHERE column_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to detach cards", e))?
            .rows_affected();

        sqlx::query("DELETE FROM board_columns WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete column", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit column delete", e)
        })?;

        Ok(detached)
    }

    /// List the columns of a project in display order.
    pub async fn list_columns(&self, project_id: i64) -> AppResult<Vec<BoardColumn>> {
        sqlx::query_as::<_, BoardColumn>(
            "SELECT * FROM board_columns WHERE project_id = $1 ORDER BY position, id",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list columns", e))
    }

    // ── Cards ────────────────────────────────────────────────────

    /// Find a card by ID.
    pub async fn find_card(&self, id: i64) -> AppResult<Option<Card>> {
        sqlx::query_as::<_, Card>("SELECT * FROM cards WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find card", e))
    }

    /// Insert a card record.
    pub async fn create_card(&self, card: &Card) -> AppResult<Card> {
        sqlx::query_as::<_, Card>(
            "INSERT INTO cards (project_id, column_id, title, content, position, x, y, start_date, due_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(card.project_id)
        .bind(card.column_id)
        .bind(&card.title)
        .bind(&card.content)
        .bind(card.position)
        .bind(card.x)
        .bind(card.y)
        .bind(card.start_date)
        .bind(card.due_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create card", e))
    }

    /// Update a card record, bumping `updated_at`.
    pub async fn update_card(&self, card: &Card) -> AppResult<Card> {
        sqlx::query_as::<_, Card>(
            "UPDATE cards SET column_id = $2, title = $3, content = $4, position = $5, \
             x = $6, y = $7, start_date = $8, due_date = $9, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(card.id)
        .bind(card.column_id)
        .bind(&card.title)
        .bind(&card.content)
        .bind(card.position)
        .bind(card.x)
        .bind(card.y)
        .bind(card.start_date)
        .bind(card.due_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update card", e))?
        .ok_or_else(|| AppError::not_found(format!("Card {} not found", card.id)))
    }

    /// Delete a card.
    pub async fn delete_card(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM cards WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete card", e))?;
        Ok(())
    }

    /// List every card in a project.
    pub async fn list_cards(&self, project_id: i64) -> AppResult<Vec<Card>> {
        sqlx::query_as::<_, Card>("SELECT * FROM cards WHERE project_id = $1 ORDER BY id")
            .bind(project_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list cards", e))
    }

    /// List the cards of one column in display order.
    pub async fn list_cards_in_column(&self, column_id: i64) -> AppResult<Vec<Card>> {
        sqlx::query_as::<_, Card>(
            "SELECT * FROM cards WHERE column_id = $1 ORDER BY position, id",
        )
        .bind(column_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list column cards", e))
    }

    // ── Assignees ────────────────────────────────────────────────

    /// Replace the assignee set of a card.
    pub async fn set_assignees(&self, card_id: i64, user_ids: &[i64]) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("DELETE FROM card_assignees WHERE card_id = $1")
            .bind(card_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear assignees", e)
            })?;

        for user_id in user_ids {
            sqlx::query(
                "INSERT INTO card_assignees (card_id, user_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(card_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to insert assignee", e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit assignees", e)
        })?;
        Ok(())
    }

    /// List assignee user ids for a card.
    pub async fn list_assignees(&self, card_id: i64) -> AppResult<Vec<i64>> {
        sqlx::query_scalar::<_, i64>("SELECT user_id FROM card_assignees WHERE card_id = $1")
            .bind(card_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list assignees", e))
    }

    // ── Dependencies ─────────────────────────────────────────────

    /// Create a dependency edge between two cards.
    pub async fn create_dependency(
        &self,
        from_card_id: i64,
        to_card_id: i64,
    ) -> AppResult<CardDependency> {
        sqlx::query_as::<_, CardDependency>(
            "INSERT INTO card_dependencies (from_card_id, to_card_id) \
             VALUES ($1, $2) RETURNING *",
        )
        .bind(from_card_id)
        .bind(to_card_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("These cards are already connected")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create dependency", e)
            }
        })
    }

    /// Delete a dependency edge. Returns whether an edge was removed.
    pub async fn delete_dependency(&self, from_card_id: i64, to_card_id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM card_dependencies WHERE from_card_id = $1 AND to_card_id = $2",
        )
        .bind(from_card_id)
        .bind(to_card_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete dependency", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// List every dependency edge whose origin card lives in the project.
    pub async fn list_dependencies(&self, project_id: i64) -> AppResult<Vec<CardDependency>> {
        sqlx::query_as::<_, CardDependency>(
            "SELECT d.* FROM card_dependencies d \
             JOIN cards c ON c.id = d.from_card_id \
             WHERE c.project_id = $1",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list dependencies", e))
    }

    // ── Comments ─────────────────────────────────────────────────

    /// Create a comment on a card.
    pub async fn create_comment(
        &self,
        card_id: i64,
        user_id: i64,
        content: &str,
    ) -> AppResult<CardComment> {
        sqlx::query_as::<_, CardComment>(
            "INSERT INTO card_comments (card_id, user_id, content) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(card_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create comment", e))
    }

    /// Find a comment by ID.
    pub async fn find_comment(&self, id: i64) -> AppResult<Option<CardComment>> {
        sqlx::query_as::<_, CardComment>("SELECT * FROM card_comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find comment", e))
    }

    /// Delete a comment.
    pub async fn delete_comment(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM card_comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete comment", e))?;
        Ok(())
    }

    /// List the comments of a card, oldest first.
    pub async fn list_comments(&self, card_id: i64) -> AppResult<Vec<CardComment>> {
        sqlx::query_as::<_, CardComment>(
            "SELECT * FROM card_comments WHERE card_id = $1 ORDER BY created_at",
        )
        .bind(card_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list comments", e))
    }

    // ── File attachments ─────────────────────────────────────────

    /// Attach a file to a card. Attaching twice is a no-op.
    pub async fn attach_file(&self, card_id: i64, file_id: i64) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO card_files (card_id, file_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(card_id)
        .bind(file_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to attach file", e))?;
        Ok(())
    }

    /// Detach a file from a card. Returns whether a link was removed.
    pub async fn detach_file(&self, card_id: i64, file_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM card_files WHERE card_id = $1 AND file_id = $2")
            .bind(card_id)
            .bind(file_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to detach file", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// List the file ids attached to a card.
    pub async fn list_card_files(&self, card_id: i64) -> AppResult<Vec<i64>> {
        sqlx::query_scalar::<_, i64>("SELECT file_id FROM card_files WHERE card_id = $1")
            .bind(card_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list card files", e))
    }
}
