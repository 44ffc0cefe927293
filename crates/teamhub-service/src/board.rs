//! Board service — kanban columns, cards, dependencies, comments, and
//! file attachments.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use teamhub_core::error::AppError;
use teamhub_core::result::AppResult;
use teamhub_database::repositories::board::BoardRepository;
use teamhub_database::repositories::user::UserRepository;
use teamhub_entity::board::{
    BoardColumn, Card, CardComment, CardDependency, CreateCard, CreateColumn, UpdateCard,
    UpdateColumn,
};
use teamhub_entity::user::User;

use crate::activity::ActivityService;
use crate::file::{FileService, FileWithVersion};
use crate::project::ProjectService;

/// A card expanded with its assignees and attached files.
#[derive(Debug, Clone)]
pub struct CardDetail {
    /// The card itself.
    pub card: Card,
    /// Users assigned to the card.
    pub assignees: Vec<User>,
    /// Attached files with their latest versions.
    pub files: Vec<FileWithVersion>,
}

/// One column of the board view with its cards in display order.
#[derive(Debug, Clone)]
pub struct ColumnWithCards {
    /// The column.
    pub column: BoardColumn,
    /// Its cards, ordered by position.
    pub cards: Vec<Card>,
}

/// Manages the kanban surface of a project.
#[derive(Debug, Clone)]
pub struct BoardService {
    board: Arc<BoardRepository>,
    users: Arc<UserRepository>,
    projects: ProjectService,
    files: FileService,
    activity: ActivityService,
}

impl BoardService {
    /// Create a new board service.
    pub fn new(
        board: Arc<BoardRepository>,
        users: Arc<UserRepository>,
        projects: ProjectService,
        files: FileService,
        activity: ActivityService,
    ) -> Self {
        Self {
            board,
            users,
            projects,
            files,
            activity,
        }
    }

    // ── Columns ──────────────────────────────────────────────────

    /// Create a column on a project board.
    pub async fn create_column(
        &self,
        project_id: i64,
        data: CreateColumn,
    ) -> AppResult<BoardColumn> {
        self.projects.require_project(project_id).await?;
        self.board
            .create_column(project_id, &data.title, data.position)
            .await
    }

    /// Apply a partial update to a column.
    pub async fn update_column(
        &self,
        column_id: i64,
        data: UpdateColumn,
    ) -> AppResult<BoardColumn> {
        let mut column = self.require_column(column_id).await?;
        if let Some(title) = data.title {
            column.title = title;
        }
        if let Some(position) = data.position {
            column.position = position;
        }
        self.board.update_column(&column).await
    }

    /// Delete a column. Its cards are detached into the archive, not
    /// deleted. Returns the number of detached cards.
    pub async fn delete_column(&self, column_id: i64, user_id: i64) -> AppResult<u64> {
        let column = self.require_column(column_id).await?;
        let project = self.projects.require_project(column.project_id).await?;

        let detached = self.board.delete_column(column_id).await?;

        self.activity
            .log(
                Some(project.workspace_id),
                user_id,
                "DELETE",
                &format!(
                    "deleted column '{}' ({detached} cards archived)",
                    column.title
                ),
            )
            .await;
        Ok(detached)
    }

    /// List a project's columns.
    pub async fn list_columns(&self, project_id: i64) -> AppResult<Vec<BoardColumn>> {
        self.projects.require_project(project_id).await?;
        self.board.list_columns(project_id).await
    }

    /// The full board view: every column with its cards.
    pub async fn board(&self, project_id: i64) -> AppResult<Vec<ColumnWithCards>> {
        self.projects.require_project(project_id).await?;

        let columns = self.board.list_columns(project_id).await?;
        let mut result = Vec::with_capacity(columns.len());
        for column in columns {
            let cards = self.board.list_cards_in_column(column.id).await?;
            result.push(ColumnWithCards { column, cards });
        }
        Ok(result)
    }

    // ── Cards ────────────────────────────────────────────────────

    /// Create a card, optionally placed in a column of the same project.
    pub async fn create_card(
        &self,
        project_id: i64,
        user_id: i64,
        data: CreateCard,
    ) -> AppResult<CardDetail> {
        let project = self.projects.require_project(project_id).await?;

        if let Some(column_id) = data.column_id {
            let column = self.require_column(column_id).await?;
            if column.project_id != project_id {
                return Err(AppError::validation(
                    "Column does not belong to this project",
                ));
            }
        }

        let now = Utc::now();
        let card = self
            .board
            .create_card(&Card {
                id: 0,
                project_id,
                column_id: data.column_id,
                title: data.title,
                content: data.content,
                position: data.position,
                x: data.x,
                y: data.y,
                start_date: data.start_date,
                due_date: data.due_date,
                created_at: now,
                updated_at: now,
            })
            .await?;

        if !data.assignee_ids.is_empty() {
            self.board.set_assignees(card.id, &data.assignee_ids).await?;
        }

        self.activity
            .log(
                Some(project.workspace_id),
                user_id,
                "CREATE",
                &format!("created card '{}' in project '{}'", card.title, project.name),
            )
            .await;

        self.card_detail(card.id).await
    }

    /// List every card of a project.
    pub async fn list_cards(&self, project_id: i64) -> AppResult<Vec<Card>> {
        self.projects.require_project(project_id).await?;
        self.board.list_cards(project_id).await
    }

    /// A card with its assignees and attached files.
    pub async fn card_detail(&self, card_id: i64) -> AppResult<CardDetail> {
        let card = self.require_card(card_id).await?;

        let assignee_ids = self.board.list_assignees(card_id).await?;
        let assignees = if assignee_ids.is_empty() {
            Vec::new()
        } else {
            self.users.find_by_ids(&assignee_ids).await?
        };

        let file_ids = self.board.list_card_files(card_id).await?;
        let mut files = Vec::with_capacity(file_ids.len());
        for file_id in file_ids {
            let file = self.files.require_file(file_id).await?;
            let latest_version = self.files.latest_version(file.id).await?;
            files.push(FileWithVersion {
                file,
                latest_version,
            });
        }

        Ok(CardDetail {
            card,
            assignees,
            files,
        })
    }

    /// Apply a partial update to a card.
    pub async fn update_card(&self, card_id: i64, data: UpdateCard) -> AppResult<CardDetail> {
        let mut card = self.require_card(card_id).await?;

        if let Some(column_id) = data.column_id {
            let column = self.require_column(column_id).await?;
            if column.project_id != card.project_id {
                return Err(AppError::validation(
                    "Column does not belong to this project",
                ));
            }
            card.column_id = Some(column_id);
        }
        if let Some(title) = data.title {
            card.title = title;
        }
        if let Some(content) = data.content {
            card.content = Some(content);
        }
        if let Some(position) = data.position {
            card.position = position;
        }
        if let Some(x) = data.x {
            card.x = x;
        }
        if let Some(y) = data.y {
            card.y = y;
        }
        if let Some(start_date) = data.start_date {
            card.start_date = Some(start_date);
        }
        if let Some(due_date) = data.due_date {
            card.due_date = Some(due_date);
        }

        self.board.update_card(&card).await?;

        if let Some(assignee_ids) = data.assignee_ids {
            self.board.set_assignees(card_id, &assignee_ids).await?;
        }

        self.card_detail(card_id).await
    }

    /// Delete a card.
    pub async fn delete_card(&self, card_id: i64, user_id: i64) -> AppResult<()> {
        let card = self.require_card(card_id).await?;
        let project = self.projects.require_project(card.project_id).await?;

        self.board.delete_card(card_id).await?;

        self.activity
            .log(
                Some(project.workspace_id),
                user_id,
                "DELETE",
                &format!("deleted card '{}'", card.title),
            )
            .await;
        Ok(())
    }

    // ── Dependencies ─────────────────────────────────────────────

    /// Every dependency edge within a project.
    pub async fn list_dependencies(&self, project_id: i64) -> AppResult<Vec<CardDependency>> {
        self.projects.require_project(project_id).await?;
        self.board.list_dependencies(project_id).await
    }

    /// Connect two cards of the same project with a dependency edge.
    pub async fn connect_cards(
        &self,
        user_id: i64,
        from_card_id: i64,
        to_card_id: i64,
    ) -> AppResult<CardDependency> {
        let from = self.require_card(from_card_id).await?;
        let to = self.require_card(to_card_id).await?;

        if from.project_id != to.project_id {
            return Err(AppError::validation(
                "Cards of different projects cannot be connected",
            ));
        }

        let dependency = self.board.create_dependency(from.id, to.id).await?;

        let project = self.projects.require_project(from.project_id).await?;
        self.activity
            .log(
                Some(project.workspace_id),
                user_id,
                "UPDATE",
                &format!("connected card '{}' to '{}'", from.title, to.title),
            )
            .await;

        Ok(dependency)
    }

    /// Remove a dependency edge.
    pub async fn disconnect_cards(&self, from_card_id: i64, to_card_id: i64) -> AppResult<()> {
        let removed = self
            .board
            .delete_dependency(from_card_id, to_card_id)
            .await?;
        if !removed {
            return Err(AppError::not_found("Connection not found"));
        }
        Ok(())
    }

    // ── Comments ─────────────────────────────────────────────────

    /// Comment on a card.
    pub async fn add_comment(
        &self,
        card_id: i64,
        user_id: i64,
        content: &str,
    ) -> AppResult<CardComment> {
        self.require_card(card_id).await?;
        self.board.create_comment(card_id, user_id, content).await
    }

    /// List a card's comments, oldest first.
    pub async fn list_comments(&self, card_id: i64) -> AppResult<Vec<CardComment>> {
        self.require_card(card_id).await?;
        self.board.list_comments(card_id).await
    }

    /// Delete a comment. Authors only.
    pub async fn delete_comment(&self, comment_id: i64, user_id: i64) -> AppResult<()> {
        let comment = self
            .board
            .find_comment(comment_id)
            .await?
            .ok_or_else(|| AppError::not_found("Comment not found"))?;

        if comment.user_id != user_id {
            return Err(AppError::authorization("Only the author can delete this"));
        }

        self.board.delete_comment(comment_id).await
    }

    // ── Attachments ──────────────────────────────────────────────

    /// Attach a file to a card. Attaching an already-attached file is a
    /// no-op.
    pub async fn attach_file(
        &self,
        card_id: i64,
        file_id: i64,
        user_id: i64,
    ) -> AppResult<CardDetail> {
        let card = self.require_card(card_id).await?;
        let file = self.files.require_file(file_id).await?;

        self.board.attach_file(card_id, file_id).await?;

        let project = self.projects.require_project(card.project_id).await?;
        self.activity
            .log(
                Some(project.workspace_id),
                user_id,
                "ATTACH",
                &format!("attached '{}' to card '{}'", file.filename, card.title),
            )
            .await;

        self.card_detail(card_id).await
    }

    /// Detach a file from a card.
    pub async fn detach_file(&self, card_id: i64, file_id: i64, user_id: i64) -> AppResult<()> {
        let card = self.require_card(card_id).await?;
        let file = self.files.require_file(file_id).await?;

        let removed = self.board.detach_file(card_id, file_id).await?;
        if !removed {
            return Err(AppError::not_found("File is not attached to this card"));
        }

        let project = self.projects.require_project(card.project_id).await?;
        self.activity
            .log(
                Some(project.workspace_id),
                user_id,
                "DETACH",
                &format!("detached '{}' from card '{}'", file.filename, card.title),
            )
            .await;

        info!(card_id, file_id, "File detached from card");
        Ok(())
    }

    // ── Lookups ──────────────────────────────────────────────────

    async fn require_card(&self, card_id: i64) -> AppResult<Card> {
        self.board
            .find_card(card_id)
            .await?
            .ok_or_else(|| AppError::not_found("Card not found"))
    }

    async fn require_column(&self, column_id: i64) -> AppResult<BoardColumn> {
        self.board
            .find_column(column_id)
            .await?
            .ok_or_else(|| AppError::not_found("Column not found"))
    }
}
