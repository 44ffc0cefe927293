//! Kanban board handlers — columns, cards, connections, comments,
//! attachments.

use axum::Json;
use axum::extract::{Path, State};

use teamhub_entity::board::{
    BoardColumn, Card, CardComment, CreateCard, CreateColumn, UpdateCard, UpdateColumn,
};

use crate::dto::request::{CreateCommentRequest, CreateConnectionRequest};
use crate::dto::response::{
    BoardColumnResponse, CardResponse, ConnectionResponse, MessageResponse,
};
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

// ── Columns ──────────────────────────────────────────────────────

/// POST /api/projects/{id}/columns
pub async fn create_column(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(project_id): Path<i64>,
    Json(req): Json<CreateColumn>,
) -> Result<Json<BoardColumn>, ApiError> {
    Ok(Json(state.board.create_column(project_id, req).await?))
}

/// GET /api/projects/{id}/columns
pub async fn list_columns(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(project_id): Path<i64>,
) -> Result<Json<Vec<BoardColumn>>, ApiError> {
    Ok(Json(state.board.list_columns(project_id).await?))
}

/// PATCH /api/columns/{id}
pub async fn update_column(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(column_id): Path<i64>,
    Json(req): Json<UpdateColumn>,
) -> Result<Json<BoardColumn>, ApiError> {
    Ok(Json(state.board.update_column(column_id, req).await?))
}

/// DELETE /api/columns/{id}
pub async fn delete_column(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(column_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let detached = state.board.delete_column(column_id, user.id).await?;
    Ok(Json(MessageResponse::new(format!(
        "Column deleted, {detached} cards moved to the archive"
    ))))
}

// ── Board view & cards ───────────────────────────────────────────

/// GET /api/projects/{id}/board
pub async fn board(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(project_id): Path<i64>,
) -> Result<Json<Vec<BoardColumnResponse>>, ApiError> {
    let columns = state.board.board(project_id).await?;
    Ok(Json(
        columns.into_iter().map(BoardColumnResponse::from).collect(),
    ))
}

/// POST /api/projects/{id}/cards
pub async fn create_card(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<i64>,
    Json(req): Json<CreateCard>,
) -> Result<Json<CardResponse>, ApiError> {
    let detail = state.board.create_card(project_id, user.id, req).await?;
    Ok(Json(CardResponse::from(detail)))
}

/// GET /api/projects/{id}/cards
pub async fn list_cards(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(project_id): Path<i64>,
) -> Result<Json<Vec<Card>>, ApiError> {
    Ok(Json(state.board.list_cards(project_id).await?))
}

/// GET /api/cards/{id}
pub async fn get_card(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(card_id): Path<i64>,
) -> Result<Json<CardResponse>, ApiError> {
    let detail = state.board.card_detail(card_id).await?;
    Ok(Json(CardResponse::from(detail)))
}

/// PATCH /api/cards/{id}
pub async fn update_card(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(card_id): Path<i64>,
    Json(req): Json<UpdateCard>,
) -> Result<Json<CardResponse>, ApiError> {
    let detail = state.board.update_card(card_id, req).await?;
    Ok(Json(CardResponse::from(detail)))
}

/// DELETE /api/cards/{id}
pub async fn delete_card(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(card_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.board.delete_card(card_id, user.id).await?;
    Ok(Json(MessageResponse::new("Card deleted")))
}

// ── Connections ──────────────────────────────────────────────────

/// GET /api/projects/{id}/connections
pub async fn list_connections(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(project_id): Path<i64>,
) -> Result<Json<Vec<ConnectionResponse>>, ApiError> {
    let edges = state.board.list_dependencies(project_id).await?;
    Ok(Json(edges.into_iter().map(ConnectionResponse::from).collect()))
}

/// POST /api/cards/connections
pub async fn create_connection(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreateConnectionRequest>,
) -> Result<Json<ConnectionResponse>, ApiError> {
    let edge = state
        .board
        .connect_cards(user.id, req.from_card_id, req.to_card_id)
        .await?;
    Ok(Json(ConnectionResponse::from(edge)))
}

/// DELETE /api/cards/connections/{from}/{to}
pub async fn delete_connection(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path((from_card_id, to_card_id)): Path<(i64, i64)>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .board
        .disconnect_cards(from_card_id, to_card_id)
        .await?;
    Ok(Json(MessageResponse::new("Connection removed")))
}

// ── Comments ─────────────────────────────────────────────────────

/// POST /api/cards/{id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(card_id): Path<i64>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<Json<CardComment>, ApiError> {
    Ok(Json(
        state.board.add_comment(card_id, user.id, &req.content).await?,
    ))
}

/// GET /api/cards/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(card_id): Path<i64>,
) -> Result<Json<Vec<CardComment>>, ApiError> {
    Ok(Json(state.board.list_comments(card_id).await?))
}

/// DELETE /api/cards/comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(comment_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.board.delete_comment(comment_id, user.id).await?;
    Ok(Json(MessageResponse::new("Comment deleted")))
}

// ── Attachments ──────────────────────────────────────────────────

/// POST /api/cards/{id}/files/{file_id}
pub async fn attach_file(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((card_id, file_id)): Path<(i64, i64)>,
) -> Result<Json<CardResponse>, ApiError> {
    let detail = state.board.attach_file(card_id, file_id, user.id).await?;
    Ok(Json(CardResponse::from(detail)))
}

/// DELETE /api/cards/{id}/files/{file_id}
pub async fn detach_file(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((card_id, file_id)): Path<(i64, i64)>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.board.detach_file(card_id, file_id, user.id).await?;
    Ok(Json(MessageResponse::new("File detached")))
}
