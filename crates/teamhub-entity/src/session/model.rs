//! Cookie-session entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An authenticated session. The opaque `token` value travels in the
/// session cookie and is the primary key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserSession {
    /// Opaque session token.
    pub token: String,
    /// The user this session belongs to.
    pub user_id: i64,
    /// When the session stops being valid.
    pub expires_at: DateTime<Utc>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
}

impl UserSession {
    /// Whether the session has passed its expiry.
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}
