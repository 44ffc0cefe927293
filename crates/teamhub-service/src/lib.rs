//! # teamhub-service
//!
//! Domain services orchestrating repositories, blob storage, the room
//! registry, and the mailer. Each service is constructed once at startup
//! and shared behind an `Arc` in the API state.

pub mod activity;
pub mod auth;
pub mod board;
pub mod chat;
pub mod file;
pub mod mail;
pub mod post;
pub mod project;
pub mod schedule;
pub mod user;
pub mod workspace;

pub use activity::ActivityService;
pub use auth::AuthService;
pub use board::BoardService;
pub use chat::ChatService;
pub use file::FileService;
pub use mail::Mailer;
pub use post::PostService;
pub use project::ProjectService;
pub use schedule::ScheduleService;
pub use user::UserService;
pub use workspace::WorkspaceService;
