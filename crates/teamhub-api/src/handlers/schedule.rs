//! Schedule handlers.

use axum::Json;
use axum::extract::{Path, State};

use teamhub_entity::schedule::Schedule;

use crate::dto::request::CreateScheduleRequest;
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// POST /api/schedules
pub async fn create_schedule(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreateScheduleRequest>,
) -> Result<Json<Schedule>, ApiError> {
    let schedule = state
        .schedules
        .add(
            user.id,
            req.day_of_week,
            req.start_time,
            req.end_time,
            req.description,
        )
        .await?;
    Ok(Json(schedule))
}

/// GET /api/schedules
pub async fn list_schedules(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Schedule>>, ApiError> {
    Ok(Json(state.schedules.list_mine(user.id).await?))
}

/// DELETE /api/schedules/{id}
pub async fn delete_schedule(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(schedule_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.schedules.delete(schedule_id, user.id).await?;
    Ok(Json(MessageResponse::new("Schedule deleted")))
}
