//! Post board repository implementation.

use sqlx::PgPool;

use teamhub_core::error::{AppError, ErrorKind};
use teamhub_core::result::AppResult;
use teamhub_entity::post::{Post, PostComment};

/// Repository for posts and post comments.
#[derive(Debug, Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    /// Create a new post repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a post by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Post>> {
        sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find post", e))
    }

    /// Create a post.
    pub async fn create(
        &self,
        project_id: i64,
        user_id: i64,
        title: &str,
        content: &str,
    ) -> AppResult<Post> {
        sqlx::query_as::<_, Post>(
            "INSERT INTO posts (project_id, user_id, title, content) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(project_id)
        .bind(user_id)
        .bind(title)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create post", e))
    }

    /// Update a post's title/content, bumping `updated_at`.
    pub async fn update(&self, id: i64, title: &str, content: &str) -> AppResult<Post> {
        sqlx::query_as::<_, Post>(
            "UPDATE posts SET title = $2, content = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(title)
        .bind(content)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update post", e))?
        .ok_or_else(|| AppError::not_found(format!("Post {id} not found")))
    }

    /// Delete a post.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete post", e))?;
        Ok(())
    }

    /// List the posts of a project, most recent first.
    pub async fn find_by_project(&self, project_id: i64) -> AppResult<Vec<Post>> {
        sqlx::query_as::<_, Post>(
            "SELECT * FROM posts WHERE project_id = $1 ORDER BY created_at DESC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list posts", e))
    }

    /// Create a comment under a post.
    pub async fn create_comment(
        &self,
        post_id: i64,
        user_id: i64,
        content: &str,
    ) -> AppResult<PostComment> {
        sqlx::query_as::<_, PostComment>(
            "INSERT INTO post_comments (post_id, user_id, content) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(post_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create post comment", e))
    }

    /// Find a post comment by ID.
    pub async fn find_comment(&self, id: i64) -> AppResult<Option<PostComment>> {
        sqlx::query_as::<_, PostComment>("SELECT * FROM post_comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find post comment", e))
    }

    /// Delete a post comment.
    pub async fn delete_comment(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM post_comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete post comment", e)
            })?;
        Ok(())
    }

    /// List the comments of a post, oldest first.
    pub async fn list_comments(&self, post_id: i64) -> AppResult<Vec<PostComment>> {
        sqlx::query_as::<_, PostComment>(
            "SELECT * FROM post_comments WHERE post_id = $1 ORDER BY created_at",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list post comments", e))
    }
}
