//! Workspace service — creation, membership, and listing.

use std::sync::Arc;

use tracing::info;

use teamhub_core::error::AppError;
use teamhub_core::result::AppResult;
use teamhub_database::repositories::user::UserRepository;
use teamhub_database::repositories::workspace::WorkspaceRepository;
use teamhub_entity::user::User;
use teamhub_entity::workspace::{CreateWorkspace, Workspace, WorkspaceMember, WorkspaceRole};

use crate::activity::ActivityService;

/// A workspace member joined with their user record, for member listings.
#[derive(Debug, Clone)]
pub struct MemberWithUser {
    /// The membership record.
    pub member: WorkspaceMember,
    /// The member's user account.
    pub user: User,
}

/// Manages workspaces and their memberships.
#[derive(Debug, Clone)]
pub struct WorkspaceService {
    workspaces: Arc<WorkspaceRepository>,
    users: Arc<UserRepository>,
    activity: ActivityService,
}

impl WorkspaceService {
    /// Create a new workspace service.
    pub fn new(
        workspaces: Arc<WorkspaceRepository>,
        users: Arc<UserRepository>,
        activity: ActivityService,
    ) -> Self {
        Self {
            workspaces,
            users,
            activity,
        }
    }

    /// Create a workspace; the creator becomes its owner and first admin.
    pub async fn create(
        &self,
        user_id: i64,
        name: &str,
        description: Option<String>,
    ) -> AppResult<Workspace> {
        let workspace = self
            .workspaces
            .create(&CreateWorkspace {
                name: name.to_string(),
                description,
                owner_id: user_id,
            })
            .await?;

        info!(workspace_id = workspace.id, user_id, "Workspace created");
        Ok(workspace)
    }

    /// List the workspaces the user belongs to.
    pub async fn list_mine(&self, user_id: i64) -> AppResult<Vec<Workspace>> {
        self.workspaces.find_by_member(user_id).await
    }

    /// Ensure the user is a member of the workspace, returning the
    /// membership. Non-members get an authorization rejection.
    pub async fn require_member(
        &self,
        workspace_id: i64,
        user_id: i64,
    ) -> AppResult<WorkspaceMember> {
        self.workspaces
            .find_member(workspace_id, user_id)
            .await?
            .ok_or_else(|| AppError::authorization("Not a member of this workspace"))
    }

    /// Add a user to the workspace by email. Caller must be a member.
    pub async fn add_member_by_email(
        &self,
        workspace_id: i64,
        acting_user_id: i64,
        email: &str,
    ) -> AppResult<WorkspaceMember> {
        self.require_member(workspace_id, acting_user_id).await?;

        let workspace = self
            .workspaces
            .find_by_id(workspace_id)
            .await?
            .ok_or_else(|| AppError::not_found("Workspace not found"))?;

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("No account with this email"))?;

        let member = self
            .workspaces
            .add_member(workspace_id, user.id, WorkspaceRole::Member)
            .await?;

        self.activity
            .log(
                Some(workspace_id),
                acting_user_id,
                "UPDATE",
                &format!("'{}' joined workspace '{}'", user.name, workspace.name),
            )
            .await;

        Ok(member)
    }

    /// List the members of a workspace with their user records.
    pub async fn list_members(
        &self,
        workspace_id: i64,
        acting_user_id: i64,
    ) -> AppResult<Vec<MemberWithUser>> {
        self.require_member(workspace_id, acting_user_id).await?;

        let user_ids = self.workspaces.member_user_ids(workspace_id).await?;
        let users = self.users.find_by_ids(&user_ids).await?;

        let mut result = Vec::with_capacity(users.len());
        for user in users {
            if let Some(member) = self.workspaces.find_member(workspace_id, user.id).await? {
                result.push(MemberWithUser { member, user });
            }
        }
        Ok(result)
    }

    /// The user ids of every member, for free-time computation.
    pub async fn member_user_ids(&self, workspace_id: i64) -> AppResult<Vec<i64>> {
        self.workspaces.member_user_ids(workspace_id).await
    }
}
