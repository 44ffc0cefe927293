//! File handlers — upload, batch upload, listing, history, download,
//! delete. Mutations broadcast board events to the project's event room.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use serde::Deserialize;

use teamhub_core::error::AppError;
use teamhub_realtime::RoomEvent;
use teamhub_service::file::UploadItem;

use crate::dto::response::{FileResponse, FileVersionResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// POST /api/projects/{id}/files
pub async fn upload_file(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<FileResponse>, ApiError> {
    let mut items = read_upload_fields(multipart).await?;
    let Some(item) = items.pop() else {
        return Err(ApiError(AppError::validation(
            "Multipart body is missing a 'file' field",
        )));
    };

    let stored = state
        .files
        .store(project_id, &item.filename, item.data, user.id)
        .await?;
    let response = FileResponse::from(stored);

    let event = RoomEvent::FileUploaded {
        user_id: user.id,
        data: serde_json::to_value(&response).map_err(AppError::from)?,
    };
    state
        .board_rooms
        .broadcast(project_id, &event.to_json(), None);

    Ok(Json(response))
}

/// POST /api/projects/{id}/files/batch
pub async fn upload_files_batch(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(project_id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<Vec<FileResponse>>, ApiError> {
    let items = read_upload_fields(multipart).await?;
    if items.is_empty() {
        return Err(ApiError(AppError::validation(
            "Multipart body contains no files",
        )));
    }

    let stored = state.files.store_batch(project_id, items, user.id).await?;
    let responses: Vec<FileResponse> = stored.into_iter().map(FileResponse::from).collect();

    if !responses.is_empty() {
        let event = RoomEvent::FilesBatchUploaded {
            user_id: user.id,
            data: serde_json::to_value(&responses).map_err(AppError::from)?,
        };
        state
            .board_rooms
            .broadcast(project_id, &event.to_json(), None);
    }

    Ok(Json(responses))
}

/// GET /api/projects/{id}/files
pub async fn list_files(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(project_id): Path<i64>,
) -> Result<Json<Vec<FileResponse>>, ApiError> {
    let files = state.files.list(project_id).await?;
    Ok(Json(files.into_iter().map(FileResponse::from).collect()))
}

/// GET /api/files/{id}/history
pub async fn file_history(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(file_id): Path<i64>,
) -> Result<Json<Vec<FileVersionResponse>>, ApiError> {
    let versions = state.files.history(file_id).await?;
    Ok(Json(
        versions.into_iter().map(FileVersionResponse::from).collect(),
    ))
}

/// Query string for downloads.
#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    /// Specific version to download; latest when omitted.
    pub version: Option<i32>,
}

/// GET /api/files/{id}/download
pub async fn download_file(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(file_id): Path<i64>,
    Query(query): Query<DownloadQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (file, version, stream) = state.files.download(file_id, query.version).await?;

    let headers = [
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.filename),
        ),
        (header::CONTENT_LENGTH, version.file_size.to_string()),
    ];

    Ok((headers, Body::from_stream(stream)))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(file_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let file = state.files.require_file(file_id).await?;
    let project_id = file.project_id;

    state.files.delete(file_id, user.id).await?;

    let event = RoomEvent::FileDeleted {
        user_id: user.id,
        data: serde_json::json!({ "id": file_id }),
    };
    state
        .board_rooms
        .broadcast(project_id, &event.to_json(), None);

    Ok(Json(MessageResponse::new("File deleted")))
}

/// Drain every `file` field of a multipart body into upload items.
async fn read_upload_fields(mut multipart: Multipart) -> Result<Vec<UploadItem>, ApiError> {
    let mut items = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError(AppError::validation(format!("Invalid multipart body: {e}")))
    })? {
        if field.name() != Some("file") && field.name() != Some("files") {
            continue;
        }

        let filename = field
            .file_name()
            .map(String::from)
            .ok_or_else(|| ApiError(AppError::validation("Upload is missing a filename")))?;
        let data = field.bytes().await.map_err(|e| {
            ApiError(AppError::validation(format!("Failed to read upload: {e}")))
        })?;

        items.push(UploadItem { filename, data });
    }

    Ok(items)
}
