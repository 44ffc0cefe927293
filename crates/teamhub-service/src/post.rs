//! Post board service.

use std::sync::Arc;

use teamhub_core::error::AppError;
use teamhub_core::result::AppResult;
use teamhub_database::repositories::post::PostRepository;
use teamhub_entity::post::{Post, PostComment};

use crate::project::ProjectService;

/// Manages project posts and their comments. Updates and deletions are
/// restricted to the author.
#[derive(Debug, Clone)]
pub struct PostService {
    posts: Arc<PostRepository>,
    projects: ProjectService,
}

impl PostService {
    /// Create a new post service.
    pub fn new(posts: Arc<PostRepository>, projects: ProjectService) -> Self {
        Self { posts, projects }
    }

    /// List a project's posts, most recent first.
    pub async fn list(&self, project_id: i64) -> AppResult<Vec<Post>> {
        self.projects.require_project(project_id).await?;
        self.posts.find_by_project(project_id).await
    }

    /// Write a post.
    pub async fn create(
        &self,
        project_id: i64,
        user_id: i64,
        title: &str,
        content: &str,
    ) -> AppResult<Post> {
        self.projects.require_project(project_id).await?;
        self.posts.create(project_id, user_id, title, content).await
    }

    /// Fetch one post.
    pub async fn get(&self, post_id: i64) -> AppResult<Post> {
        self.require_post(post_id).await
    }

    /// Edit a post. Authors only; unchanged fields pass `None`.
    pub async fn update(
        &self,
        post_id: i64,
        user_id: i64,
        title: Option<String>,
        content: Option<String>,
    ) -> AppResult<Post> {
        let post = self.require_post(post_id).await?;
        if post.user_id != user_id {
            return Err(AppError::authorization("Only the author can edit this"));
        }

        let title = title.unwrap_or(post.title);
        let content = content.unwrap_or(post.content);
        self.posts.update(post_id, &title, &content).await
    }

    /// Delete a post. Authors only.
    pub async fn delete(&self, post_id: i64, user_id: i64) -> AppResult<()> {
        let post = self.require_post(post_id).await?;
        if post.user_id != user_id {
            return Err(AppError::authorization("Only the author can delete this"));
        }
        self.posts.delete(post_id).await
    }

    /// Comment under a post.
    pub async fn add_comment(
        &self,
        post_id: i64,
        user_id: i64,
        content: &str,
    ) -> AppResult<PostComment> {
        self.require_post(post_id).await?;
        self.posts.create_comment(post_id, user_id, content).await
    }

    /// List a post's comments, oldest first.
    pub async fn list_comments(&self, post_id: i64) -> AppResult<Vec<PostComment>> {
        self.require_post(post_id).await?;
        self.posts.list_comments(post_id).await
    }

    /// Delete a post comment. Authors only.
    pub async fn delete_comment(&self, comment_id: i64, user_id: i64) -> AppResult<()> {
        let comment = self
            .posts
            .find_comment(comment_id)
            .await?
            .ok_or_else(|| AppError::not_found("Comment not found"))?;

        if comment.user_id != user_id {
            return Err(AppError::authorization("Only the author can delete this"));
        }

        self.posts.delete_comment(comment_id).await
    }

    async fn require_post(&self, post_id: i64) -> AppResult<Post> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))
    }
}
