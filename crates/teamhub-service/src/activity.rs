//! Workspace activity feed.

use std::sync::Arc;

use tracing::warn;

use teamhub_core::result::AppResult;
use teamhub_database::repositories::activity::ActivityRepository;
use teamhub_entity::activity::ActivityLog;

/// Records and serves workspace activity entries.
///
/// Logging is best-effort: a failed insert is logged and swallowed so an
/// activity-feed hiccup never fails the operation being recorded.
#[derive(Debug, Clone)]
pub struct ActivityService {
    activity: Arc<ActivityRepository>,
}

impl ActivityService {
    /// Create a new activity service.
    pub fn new(activity: Arc<ActivityRepository>) -> Self {
        Self { activity }
    }

    /// Append an entry to the feed.
    pub async fn log(
        &self,
        workspace_id: Option<i64>,
        user_id: i64,
        action_type: &str,
        content: &str,
    ) {
        if let Err(e) = self
            .activity
            .create(workspace_id, user_id, action_type, content)
            .await
        {
            warn!(user_id, action_type, error = %e, "Activity log insert failed");
        }
    }

    /// Most recent activity of a workspace.
    pub async fn recent(&self, workspace_id: i64, limit: i64) -> AppResult<Vec<ActivityLog>> {
        self.activity.find_by_workspace(workspace_id, limit).await
    }
}
