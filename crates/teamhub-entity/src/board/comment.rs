//! Card comment entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A comment on a card.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CardComment {
    /// Unique comment identifier.
    pub id: i64,
    /// The commented card.
    pub card_id: i64,
    /// The comment author.
    pub user_id: i64,
    /// Comment body.
    pub content: String,
    /// When the comment was written.
    pub created_at: DateTime<Utc>,
}
