//! `CurrentUser` extractor — resolves the session cookie to a user on
//! every authenticated route.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use teamhub_core::error::AppError;
use teamhub_entity::user::User;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated user behind the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl std::ops::Deref for CurrentUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(&state.config.session.cookie_name)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| ApiError(AppError::authentication("Login required")))?;

        let user = state.auth.authenticate(&token).await?;
        Ok(CurrentUser(user))
    }
}
