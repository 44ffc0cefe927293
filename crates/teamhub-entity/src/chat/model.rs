//! Chat message entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted chat message in a project room.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatMessage {
    /// Unique message identifier.
    pub id: i64,
    /// The project room the message was sent to.
    pub project_id: i64,
    /// The sender.
    pub user_id: i64,
    /// Message text.
    pub content: String,
    /// When the message was sent.
    pub created_at: DateTime<Utc>,
}
