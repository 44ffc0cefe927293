//! Authentication service — signup, email verification, login, logout,
//! and cookie-session validation.

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use chrono::{Duration, Utc};
use rand::RngExt;
use rand::distr::Alphanumeric;
use tracing::{info, warn};

use teamhub_core::config::{MailConfig, SessionConfig};
use teamhub_core::error::AppError;
use teamhub_core::result::AppResult;
use teamhub_database::repositories::session::SessionRepository;
use teamhub_database::repositories::user::UserRepository;
use teamhub_entity::session::UserSession;
use teamhub_entity::user::{CreateUser, User};

use crate::mail::Mailer;

/// Length of the opaque session token.
const SESSION_TOKEN_LEN: usize = 48;

/// Handles account lifecycle and session authentication.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<UserRepository>,
    sessions: Arc<SessionRepository>,
    mailer: Arc<Mailer>,
    session_config: SessionConfig,
    mail_config: MailConfig,
}

impl AuthService {
    /// Create a new auth service.
    pub fn new(
        users: Arc<UserRepository>,
        sessions: Arc<SessionRepository>,
        mailer: Arc<Mailer>,
        session_config: SessionConfig,
        mail_config: MailConfig,
    ) -> Self {
        Self {
            users,
            sessions,
            mailer,
            session_config,
            mail_config,
        }
    }

    /// Register a new, unverified account and send its verification code.
    ///
    /// The mail itself is sent from a background task so a slow SMTP relay
    /// does not delay the response.
    pub async fn signup(&self, email: &str, password: &str, name: &str) -> AppResult<User> {
        let domain = &self.mail_config.allowed_signup_domain;
        if !domain.is_empty() && !email.ends_with(&format!("@{domain}")) {
            return Err(AppError::validation(format!(
                "Signup is restricted to @{domain} addresses"
            )));
        }

        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict("This email is already registered"));
        }

        let user = self
            .users
            .create(&CreateUser {
                email: email.to_string(),
                password_hash: hash_password(password)?,
                name: name.to_string(),
            })
            .await?;

        let code = generate_code();
        self.users.upsert_verification(email, &code).await?;

        let mailer = Arc::clone(&self.mailer);
        let to = email.to_string();
        tokio::spawn(async move {
            if let Err(e) = mailer.send_verification(&to, &code).await {
                warn!(to, error = %e, "Verification mail failed");
            }
        });

        info!(user_id = user.id, "User signed up, verification pending");
        Ok(user)
    }

    /// Confirm a verification code and activate the account.
    pub async fn verify_email(&self, email: &str, code: &str) -> AppResult<()> {
        let verification = self
            .users
            .find_verification(email)
            .await?
            .filter(|v| v.code == code)
            .ok_or_else(|| AppError::validation("Verification code does not match or expired"))?;

        self.users.mark_verified(email).await?;
        self.users.delete_verification(&verification.email).await?;

        info!(email, "Email verified");
        Ok(())
    }

    /// Authenticate credentials and open a new session.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(User, UserSession)> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::authentication("Email or password does not match"))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::authentication("Email or password does not match"));
        }

        if !user.is_student_verified {
            return Err(AppError::authorization(
                "Email is not verified yet, check your inbox",
            ));
        }

        let token = generate_token();
        let expires_at = Utc::now() + Duration::hours(self.session_config.ttl_hours as i64);
        let session = self.sessions.create(&token, user.id, expires_at).await?;

        info!(user_id = user.id, "User logged in");
        Ok((user, session))
    }

    /// Close a session. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        self.sessions.delete(token).await
    }

    /// Resolve a session token to its user, rejecting missing or expired
    /// sessions. Touches the user's last-active timestamp.
    pub async fn authenticate(&self, token: &str) -> AppResult<User> {
        let session = self
            .sessions
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::authentication("Login required"))?;

        if session.is_expired() {
            self.sessions.delete(token).await?;
            return Err(AppError::authentication("Session expired"));
        }

        let user = self
            .users
            .find_by_id(session.user_id)
            .await?
            .ok_or_else(|| AppError::authentication("Session user no longer exists"))?;

        self.users.touch_last_active(user.id).await?;
        Ok(user)
    }

    /// Remove every expired session row. Run periodically by the server.
    pub async fn sweep_expired_sessions(&self) -> AppResult<u64> {
        let swept = self.sessions.delete_expired().await?;
        if swept > 0 {
            info!(swept, "Swept expired sessions");
        }
        Ok(swept)
    }
}

/// Hash a plaintext password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored Argon2id hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if not.
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::internal(format!(
            "Password verification failed: {e}"
        ))),
    }
}

/// Generate an opaque session token.
fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Generate a six-digit verification code.
fn generate_code() -> String {
    format!("{:06}", rand::rng().random_range(0..1_000_000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash).unwrap());
        assert!(!verify_password("tr0ub4dor&3", &hash).unwrap());
    }

    #[test]
    fn tokens_are_long_and_distinct() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), SESSION_TOKEN_LEN);
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn codes_are_six_digits() {
        for _ in 0..32 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
