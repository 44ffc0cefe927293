//! User repository implementation.

use sqlx::PgPool;

use teamhub_core::error::{AppError, ErrorKind};
use teamhub_core::result::AppResult;
use teamhub_entity::user::{CreateUser, EmailVerification, User};

/// Repository for user accounts and email verification codes.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    /// Find a user by email.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Create a new user record.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, name) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create user", e))
    }

    /// Update the display name.
    pub async fn update_name(&self, id: i64, name: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>("UPDATE users SET name = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Update the profile image path.
    pub async fn update_profile_image(&self, id: i64, image_url: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>("UPDATE users SET profile_image = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(image_url)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update profile image", e)
            })?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Mark a user as email-verified.
    pub async fn mark_verified(&self, email: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET is_student_verified = TRUE WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark verified", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {email} not found")));
        }
        Ok(())
    }

    /// Touch the last-active timestamp.
    pub async fn touch_last_active(&self, id: i64) -> AppResult<()> {
        sqlx::query("UPDATE users SET last_active_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to touch last_active_at", e)
            })?;
        Ok(())
    }

    /// Insert or replace the verification code for an email.
    pub async fn upsert_verification(&self, email: &str, code: &str) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO email_verifications (email, code, created_at) VALUES ($1, $2, NOW()) \
             ON CONFLICT (email) DO UPDATE SET code = $2, created_at = NOW()",
        )
        .bind(email)
        .bind(code)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to upsert verification code", e)
        })?;
        Ok(())
    }

    /// Find the pending verification code for an email.
    pub async fn find_verification(&self, email: &str) -> AppResult<Option<EmailVerification>> {
        sqlx::query_as::<_, EmailVerification>(
            "SELECT * FROM email_verifications WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find verification code", e)
        })
    }

    /// Delete a consumed verification code.
    pub async fn delete_verification(&self, email: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM email_verifications WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete verification code", e)
            })?;
        Ok(())
    }

    /// Fetch users by a set of ids (for assignee expansion).
    pub async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch users", e))
    }
}
