//! Shared application state threaded through every handler.

use std::sync::Arc;

use teamhub_core::config::AppConfig;
use teamhub_realtime::RoomRegistry;
use teamhub_service::{
    ActivityService, AuthService, BoardService, ChatService, FileService, PostService,
    ProjectService, ScheduleService, UserService, WorkspaceService,
};

/// Everything handlers need, cloned per request.
///
/// The three room registries are deliberately separate: a voice
/// connection in project N must not receive that project's chat
/// broadcasts, so chat, voice, and board-event sockets each live in
/// their own registry keyed by the same project ids.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,

    /// Chat room registry.
    pub chat_rooms: Arc<RoomRegistry>,
    /// Voice-signaling room registry.
    pub voice_rooms: Arc<RoomRegistry>,
    /// Board-event room registry (file upload/delete notifications).
    pub board_rooms: Arc<RoomRegistry>,

    /// Authentication and sessions.
    pub auth: AuthService,
    /// User profiles.
    pub users: UserService,
    /// Workspaces and memberships.
    pub workspaces: WorkspaceService,
    /// Projects.
    pub projects: ProjectService,
    /// Kanban board.
    pub board: BoardService,
    /// File version manager.
    pub files: FileService,
    /// Chat history and persistence.
    pub chat: ChatService,
    /// Post board.
    pub posts: PostService,
    /// Timetables and free-time computation.
    pub schedules: ScheduleService,
    /// Workspace activity feed.
    pub activity: ActivityService,
}
