//! User profile handlers.

use axum::Json;
use axum::extract::{Multipart, State};

use teamhub_core::error::AppError;

use crate::dto::request::UpdateUserRequest;
use crate::dto::response::UserResponse;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// GET /api/users/me
pub async fn me(user: CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(user.0))
}

/// PATCH /api/users/me
pub async fn update_me(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let updated = match req.name {
        Some(name) => state.users.update_name(user.id, &name).await?,
        None => user.0,
    };
    Ok(Json(UserResponse::from(updated)))
}

/// PATCH /api/users/me/profile-image
pub async fn update_profile_image(
    State(state): State<AppState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> Result<Json<UserResponse>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError(AppError::validation(format!("Invalid multipart body: {e}")))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(String::from)
            .ok_or_else(|| ApiError(AppError::validation("Upload is missing a filename")))?;
        let data = field.bytes().await.map_err(|e| {
            ApiError(AppError::validation(format!("Failed to read upload: {e}")))
        })?;

        let updated = state
            .users
            .update_profile_image(user.id, &filename, data)
            .await?;
        return Ok(Json(UserResponse::from(updated)));
    }

    Err(ApiError(AppError::validation(
        "Multipart body is missing a 'file' field",
    )))
}
