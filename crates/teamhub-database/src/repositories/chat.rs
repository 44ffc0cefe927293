//! Chat message repository implementation.

use sqlx::PgPool;

use teamhub_core::error::{AppError, ErrorKind};
use teamhub_core::result::AppResult;
use teamhub_entity::chat::ChatMessage;

/// Repository for persisted chat messages.
#[derive(Debug, Clone)]
pub struct ChatRepository {
    pool: PgPool,
}

impl ChatRepository {
    /// Create a new chat repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a chat message.
    pub async fn create(
        &self,
        project_id: i64,
        user_id: i64,
        content: &str,
    ) -> AppResult<ChatMessage> {
        sqlx::query_as::<_, ChatMessage>(
            "INSERT INTO chat_messages (project_id, user_id, content) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(project_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create chat message", e))
    }

    /// Most recent messages of a room, returned in ascending id order.
    ///
    /// `after_id > 0` restricts to messages newer than the given id, for
    /// incremental catch-up after a reconnect.
    pub async fn recent(
        &self,
        project_id: i64,
        limit: i64,
        after_id: i64,
    ) -> AppResult<Vec<ChatMessage>> {
        let mut messages = sqlx::query_as::<_, ChatMessage>(
            "SELECT * FROM chat_messages \
             WHERE project_id = $1 AND id > $2 \
             ORDER BY id DESC LIMIT $3",
        )
        .bind(project_id)
        .bind(after_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load chat history", e))?;

        messages.reverse();
        Ok(messages)
    }
}
