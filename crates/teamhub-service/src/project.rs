//! Project service.

use std::sync::Arc;

use tracing::info;

use teamhub_core::error::AppError;
use teamhub_core::result::AppResult;
use teamhub_database::repositories::project::ProjectRepository;
use teamhub_entity::workspace::{CreateProject, Project};

use crate::workspace::WorkspaceService;

/// Manages projects within workspaces.
#[derive(Debug, Clone)]
pub struct ProjectService {
    projects: Arc<ProjectRepository>,
    workspaces: WorkspaceService,
}

impl ProjectService {
    /// Create a new project service.
    pub fn new(projects: Arc<ProjectRepository>, workspaces: WorkspaceService) -> Self {
        Self {
            projects,
            workspaces,
        }
    }

    /// Create a project in a workspace. Members only.
    pub async fn create(
        &self,
        workspace_id: i64,
        user_id: i64,
        name: &str,
        description: Option<String>,
    ) -> AppResult<Project> {
        self.workspaces.require_member(workspace_id, user_id).await?;

        let project = self
            .projects
            .create(&CreateProject {
                workspace_id,
                name: name.to_string(),
                description,
            })
            .await?;

        info!(project_id = project.id, workspace_id, "Project created");
        Ok(project)
    }

    /// List the projects of a workspace. Members only.
    pub async fn list(&self, workspace_id: i64, user_id: i64) -> AppResult<Vec<Project>> {
        self.workspaces.require_member(workspace_id, user_id).await?;
        self.projects.find_by_workspace(workspace_id).await
    }

    /// Fetch a project or reject with NotFound.
    pub async fn require_project(&self, project_id: i64) -> AppResult<Project> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))
    }
}
