//! Request DTOs.

use chrono::NaiveTime;
use serde::Deserialize;

/// POST /api/auth/signup
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    /// Login email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Display name.
    pub name: String,
}

/// POST /api/auth/verify
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyRequest {
    /// Address the code was sent to.
    pub email: String,
    /// Six-digit verification code.
    pub code: String,
}

/// POST /api/auth/login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Login email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// PATCH /api/users/me
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
    /// New display name.
    pub name: Option<String>,
}

/// POST /api/workspaces
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkspaceRequest {
    /// Workspace name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// POST /api/workspaces/{id}/members
#[derive(Debug, Clone, Deserialize)]
pub struct AddMemberRequest {
    /// Email of the account to add.
    pub email: String,
}

/// POST /api/workspaces/{id}/projects
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRequest {
    /// Project name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// POST /api/cards/connections
#[derive(Debug, Clone, Deserialize)]
pub struct CreateConnectionRequest {
    /// Edge origin card.
    pub from_card_id: i64,
    /// Edge target card.
    pub to_card_id: i64,
}

/// Comment creation body, shared by card and post comments.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    /// Comment text.
    pub content: String,
}

/// POST /api/projects/{id}/posts
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
}

/// PATCH /api/posts/{id}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePostRequest {
    /// New title.
    pub title: Option<String>,
    /// New body.
    pub content: Option<String>,
}

/// POST /api/schedules
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScheduleRequest {
    /// Weekday, 0 = Monday through 6 = Sunday.
    pub day_of_week: i32,
    /// Block start.
    pub start_time: NaiveTime,
    /// Block end.
    pub end_time: NaiveTime,
    /// Optional label.
    pub description: Option<String>,
}

/// Query string for GET /api/projects/{id}/chat
#[derive(Debug, Clone, Deserialize)]
pub struct ChatHistoryQuery {
    /// Maximum number of messages to return.
    pub limit: Option<i64>,
    /// Only messages newer than this id.
    #[serde(default)]
    pub after_id: i64,
}
