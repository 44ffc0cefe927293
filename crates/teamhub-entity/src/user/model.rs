//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Login email address (unique).
    pub email: String,
    /// Argon2id password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Display name.
    pub name: String,
    /// URL path of the profile image, if one was uploaded.
    pub profile_image: Option<String>,
    /// Whether the account completed email verification.
    pub is_student_verified: bool,
    /// Last time the user performed an authenticated action.
    pub last_active_at: DateTime<Utc>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new user record.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Login email address.
    pub email: String,
    /// Argon2id password hash.
    pub password_hash: String,
    /// Display name.
    pub name: String,
}
