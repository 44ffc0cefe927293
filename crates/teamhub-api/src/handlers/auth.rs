//! Auth handlers — signup, email verification, login, logout.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::dto::request::{LoginRequest, SignupRequest, VerifyRequest};
use crate::dto::response::{MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .auth
        .signup(&req.email, &req.password, &req.name)
        .await?;
    Ok(Json(UserResponse::from(user)))
}

/// POST /api/auth/verify
pub async fn verify(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.auth.verify_email(&req.email, &req.code).await?;
    Ok(Json(MessageResponse::new(
        "Email verified, you can log in now",
    )))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<UserResponse>), ApiError> {
    let (user, session) = state.auth.login(&req.email, &req.password).await?;

    // Expiry is enforced server-side on the session row; the cookie
    // itself is a plain session cookie.
    let cookie = Cookie::build((state.config.session.cookie_name.clone(), session.token))
        .path("/")
        .http_only(true)
        .secure(state.config.session.cookie_secure)
        .same_site(SameSite::Lax)
        .build();

    Ok((jar.add(cookie), Json(UserResponse::from(user))))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    let name = state.config.session.cookie_name.clone();

    if let Some(cookie) = jar.get(&name) {
        state.auth.logout(cookie.value()).await?;
    }

    let removal = Cookie::build((name, String::new())).path("/").build();
    Ok((jar.remove(removal), Json(MessageResponse::new("Logged out"))))
}
