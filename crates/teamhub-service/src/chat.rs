//! Chat service — history queries and message persistence for room
//! sockets.

use std::sync::Arc;

use teamhub_core::error::AppError;
use teamhub_core::result::AppResult;
use teamhub_database::repositories::chat::ChatRepository;
use teamhub_database::repositories::user::UserRepository;
use teamhub_entity::chat::ChatMessage;
use teamhub_entity::user::User;

use crate::project::ProjectService;

/// A chat message joined with its sender, the shape chat responses use.
#[derive(Debug, Clone)]
pub struct ChatMessageWithUser {
    /// The persisted message.
    pub message: ChatMessage,
    /// The sender's account.
    pub user: User,
}

/// Persists chat traffic and serves room history.
#[derive(Debug, Clone)]
pub struct ChatService {
    chat: Arc<ChatRepository>,
    users: Arc<UserRepository>,
    projects: ProjectService,
    max_message_length: usize,
}

impl ChatService {
    /// Create a new chat service.
    pub fn new(
        chat: Arc<ChatRepository>,
        users: Arc<UserRepository>,
        projects: ProjectService,
        max_message_length: usize,
    ) -> Self {
        Self {
            chat,
            users,
            projects,
            max_message_length,
        }
    }

    /// Load room history in ascending order. `after_id > 0` returns only
    /// messages newer than the given id.
    pub async fn history(
        &self,
        project_id: i64,
        limit: i64,
        after_id: i64,
    ) -> AppResult<Vec<ChatMessageWithUser>> {
        self.projects.require_project(project_id).await?;

        let messages = self.chat.recent(project_id, limit, after_id).await?;

        let mut result = Vec::with_capacity(messages.len());
        for message in messages {
            let user = self
                .users
                .find_by_id(message.user_id)
                .await?
                .ok_or_else(|| AppError::not_found("Message sender no longer exists"))?;
            result.push(ChatMessageWithUser { message, user });
        }
        Ok(result)
    }

    /// Persist an inbound chat message and return it joined with its
    /// sender, ready to be enveloped and broadcast.
    pub async fn persist(
        &self,
        project_id: i64,
        user_id: i64,
        content: &str,
    ) -> AppResult<ChatMessageWithUser> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation("Message must not be empty"));
        }
        if trimmed.chars().count() > self.max_message_length {
            return Err(AppError::validation(format!(
                "Message exceeds {} characters",
                self.max_message_length
            )));
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Unknown sender"))?;

        let message = self.chat.create(project_id, user_id, trimmed).await?;

        Ok(ChatMessageWithUser { message, user })
    }
}
