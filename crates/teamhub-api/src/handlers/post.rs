//! Post board handlers.

use axum::Json;
use axum::extract::{Path, State};

use teamhub_entity::post::{Post, PostComment};

use crate::dto::request::{CreateCommentRequest, CreatePostRequest, UpdatePostRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// GET /api/projects/{id}/posts
pub async fn list_posts(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(project_id): Path<i64>,
) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(state.posts.list(project_id).await?))
}

/// POST /api/projects/{id}/posts
pub async fn create_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<i64>,
    Json(req): Json<CreatePostRequest>,
) -> Result<Json<Post>, ApiError> {
    Ok(Json(
        state
            .posts
            .create(project_id, user.id, &req.title, &req.content)
            .await?,
    ))
}

/// GET /api/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(post_id): Path<i64>,
) -> Result<Json<Post>, ApiError> {
    Ok(Json(state.posts.get(post_id).await?))
}

/// PATCH /api/posts/{id}
pub async fn update_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(post_id): Path<i64>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<Json<Post>, ApiError> {
    Ok(Json(
        state
            .posts
            .update(post_id, user.id, req.title, req.content)
            .await?,
    ))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(post_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.posts.delete(post_id, user.id).await?;
    Ok(Json(MessageResponse::new("Post deleted")))
}

/// POST /api/posts/{id}/comments
pub async fn create_post_comment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(post_id): Path<i64>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<Json<PostComment>, ApiError> {
    Ok(Json(
        state.posts.add_comment(post_id, user.id, &req.content).await?,
    ))
}

/// GET /api/posts/{id}/comments
pub async fn list_post_comments(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(post_id): Path<i64>,
) -> Result<Json<Vec<PostComment>>, ApiError> {
    Ok(Json(state.posts.list_comments(post_id).await?))
}

/// DELETE /api/posts/comments/{id}
pub async fn delete_post_comment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(comment_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.posts.delete_comment(comment_id, user.id).await?;
    Ok(Json(MessageResponse::new("Comment deleted")))
}
