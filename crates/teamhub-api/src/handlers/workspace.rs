//! Workspace and project handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use teamhub_core::error::AppError;
use teamhub_entity::activity::ActivityLog;
use teamhub_entity::schedule::FreeTimeSlot;
use teamhub_entity::workspace::{Project, Workspace};

use crate::dto::request::{AddMemberRequest, CreateProjectRequest, CreateWorkspaceRequest};
use crate::dto::response::MemberResponse;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// POST /api/workspaces
pub async fn create_workspace(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreateWorkspaceRequest>,
) -> Result<Json<Workspace>, ApiError> {
    let workspace = state
        .workspaces
        .create(user.id, &req.name, req.description)
        .await?;
    Ok(Json(workspace))
}

/// GET /api/workspaces
pub async fn list_workspaces(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Workspace>>, ApiError> {
    Ok(Json(state.workspaces.list_mine(user.id).await?))
}

/// POST /api/workspaces/{id}/members
pub async fn add_member(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(workspace_id): Path<i64>,
    Json(req): Json<AddMemberRequest>,
) -> Result<Json<MemberResponse>, ApiError> {
    state
        .workspaces
        .add_member_by_email(workspace_id, user.id, &req.email)
        .await?;

    // Re-read joined with the user record for the response shape.
    let members = state.workspaces.list_members(workspace_id, user.id).await?;
    let added = members
        .into_iter()
        .find(|m| m.user.email == req.email)
        .map(MemberResponse::from)
        .ok_or_else(|| ApiError(AppError::internal("Added member missing from listing")))?;
    Ok(Json(added))
}

/// GET /api/workspaces/{id}/members
pub async fn list_members(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(workspace_id): Path<i64>,
) -> Result<Json<Vec<MemberResponse>>, ApiError> {
    let members = state.workspaces.list_members(workspace_id, user.id).await?;
    Ok(Json(members.into_iter().map(MemberResponse::from).collect()))
}

/// POST /api/workspaces/{id}/projects
pub async fn create_project(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(workspace_id): Path<i64>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<Json<Project>, ApiError> {
    let project = state
        .projects
        .create(workspace_id, user.id, &req.name, req.description)
        .await?;
    Ok(Json(project))
}

/// GET /api/workspaces/{id}/projects
pub async fn list_projects(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(workspace_id): Path<i64>,
) -> Result<Json<Vec<Project>>, ApiError> {
    Ok(Json(state.projects.list(workspace_id, user.id).await?))
}

/// Query string for the activity feed.
#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    /// Maximum entries to return.
    pub limit: Option<i64>,
}

/// GET /api/workspaces/{id}/activity
pub async fn workspace_activity(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(workspace_id): Path<i64>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<ActivityLog>>, ApiError> {
    state.workspaces.require_member(workspace_id, user.id).await?;
    let entries = state
        .activity
        .recent(workspace_id, query.limit.unwrap_or(50))
        .await?;
    Ok(Json(entries))
}

/// GET /api/workspaces/{id}/free-time
pub async fn workspace_free_time(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(workspace_id): Path<i64>,
) -> Result<Json<Vec<FreeTimeSlot>>, ApiError> {
    let slots = state
        .schedules
        .workspace_free_time(workspace_id, user.id)
        .await?;
    Ok(Json(slots))
}
