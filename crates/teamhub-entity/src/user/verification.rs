//! Email verification code entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A pending email verification code. One row per email, upserted on
/// re-request so only the latest code is valid.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmailVerification {
    /// Email the code was issued for.
    pub email: String,
    /// The six-digit verification code.
    pub code: String,
    /// When the code was issued.
    pub created_at: DateTime<Utc>,
}
