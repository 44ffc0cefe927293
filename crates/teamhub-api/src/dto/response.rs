//! Response DTOs and their conversions from service views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use teamhub_entity::board::Card;
use teamhub_entity::file::FileVersion;
use teamhub_entity::user::User;
use teamhub_entity::workspace::WorkspaceMember;
use teamhub_service::board::{CardDetail, ColumnWithCards};
use teamhub_service::chat::ChatMessageWithUser;
use teamhub_service::file::FileWithVersion;
use teamhub_service::workspace::MemberWithUser;

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Build a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Public view of a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: i64,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Whether the email is verified.
    pub is_student_verified: bool,
    /// Profile image URL, if set.
    pub profile_image: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            is_student_verified: user.is_student_verified,
            profile_image: user.profile_image,
        }
    }
}

/// A workspace member with their account details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberResponse {
    /// User ID.
    pub user_id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role within the workspace.
    pub role: String,
    /// When the user joined.
    pub joined_at: DateTime<Utc>,
}

impl From<MemberWithUser> for MemberResponse {
    fn from(value: MemberWithUser) -> Self {
        let MemberWithUser { member, user } = value;
        let WorkspaceMember { role, joined_at, .. } = member;
        Self {
            user_id: user.id,
            name: user.name,
            email: user.email,
            role: role.to_string(),
            joined_at,
        }
    }
}

/// One version in a file's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileVersionResponse {
    /// Version row ID.
    pub id: i64,
    /// Sequential version number.
    pub version: i32,
    /// Artifact size in bytes.
    pub file_size: i64,
    /// Uploader.
    pub uploader_id: i64,
    /// Upload time.
    pub created_at: DateTime<Utc>,
}

impl From<FileVersion> for FileVersionResponse {
    fn from(v: FileVersion) -> Self {
        Self {
            id: v.id,
            version: v.version,
            file_size: v.file_size,
            uploader_id: v.uploader_id,
            created_at: v.created_at,
        }
    }
}

/// A logical file with its latest version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResponse {
    /// File ID.
    pub id: i64,
    /// Owning project.
    pub project_id: i64,
    /// Logical filename.
    pub filename: String,
    /// First uploader.
    pub owner_id: i64,
    /// First upload time.
    pub created_at: DateTime<Utc>,
    /// The highest-numbered version.
    pub latest_version: Option<FileVersionResponse>,
}

impl From<FileWithVersion> for FileResponse {
    fn from(value: FileWithVersion) -> Self {
        Self {
            id: value.file.id,
            project_id: value.file.project_id,
            filename: value.file.filename,
            owner_id: value.file.owner_id,
            created_at: value.file.created_at,
            latest_version: value.latest_version.map(FileVersionResponse::from),
        }
    }
}

/// A card with its assignees and attachments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardResponse {
    /// Card ID.
    pub id: i64,
    /// Owning project.
    pub project_id: i64,
    /// Holding column, if placed.
    pub column_id: Option<i64>,
    /// Title.
    pub title: String,
    /// Body text.
    pub content: Option<String>,
    /// Display order within the column.
    pub position: i32,
    /// Free-board X coordinate.
    pub x: f64,
    /// Free-board Y coordinate.
    pub y: f64,
    /// Planned start.
    pub start_date: Option<DateTime<Utc>>,
    /// Deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Assigned users.
    pub assignees: Vec<UserResponse>,
    /// Attached files.
    pub files: Vec<FileResponse>,
}

impl From<CardDetail> for CardResponse {
    fn from(detail: CardDetail) -> Self {
        let Card {
            id,
            project_id,
            column_id,
            title,
            content,
            position,
            x,
            y,
            start_date,
            due_date,
            created_at,
            updated_at,
        } = detail.card;
        Self {
            id,
            project_id,
            column_id,
            title,
            content,
            position,
            x,
            y,
            start_date,
            due_date,
            created_at,
            updated_at,
            assignees: detail.assignees.into_iter().map(UserResponse::from).collect(),
            files: detail.files.into_iter().map(FileResponse::from).collect(),
        }
    }
}

/// One column of the board view with its cards.
#[derive(Debug, Clone, Serialize)]
pub struct BoardColumnResponse {
    /// The column.
    pub column: teamhub_entity::board::BoardColumn,
    /// Its cards in display order.
    pub cards: Vec<Card>,
}

impl From<ColumnWithCards> for BoardColumnResponse {
    fn from(value: ColumnWithCards) -> Self {
        Self {
            column: value.column,
            cards: value.cards,
        }
    }
}

/// A chat message with its sender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageResponse {
    /// Message ID.
    pub id: i64,
    /// Room (project) id.
    pub project_id: i64,
    /// Sender id.
    pub user_id: i64,
    /// Message text.
    pub content: String,
    /// Send time.
    pub created_at: DateTime<Utc>,
    /// Sender summary.
    pub user: UserResponse,
}

impl From<ChatMessageWithUser> for ChatMessageResponse {
    fn from(value: ChatMessageWithUser) -> Self {
        Self {
            id: value.message.id,
            project_id: value.message.project_id,
            user_id: value.message.user_id,
            content: value.message.content,
            created_at: value.message.created_at,
            user: UserResponse::from(value.user),
        }
    }
}

/// A card dependency edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionResponse {
    /// Edge origin card.
    pub from_card_id: i64,
    /// Edge target card.
    pub to_card_id: i64,
}

impl From<teamhub_entity::board::CardDependency> for ConnectionResponse {
    fn from(d: teamhub_entity::board::CardDependency) -> Self {
        Self {
            from_card_id: d.from_card_id,
            to_card_id: d.to_card_id,
        }
    }
}

/// Health probe response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" when the server is serving.
    pub status: String,
    /// Crate version.
    pub version: String,
}
