//! Post board entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A post on a project's board.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    /// Unique post identifier.
    pub id: i64,
    /// The project the post belongs to.
    pub project_id: i64,
    /// The author.
    pub user_id: i64,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// When the post was written.
    pub created_at: DateTime<Utc>,
    /// When the post was last edited.
    pub updated_at: DateTime<Utc>,
}

/// A comment under a post.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostComment {
    /// Unique comment identifier.
    pub id: i64,
    /// The commented post.
    pub post_id: i64,
    /// The comment author.
    pub user_id: i64,
    /// Comment body.
    pub content: String,
    /// When the comment was written.
    pub created_at: DateTime<Utc>,
}
