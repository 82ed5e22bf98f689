//! Project Listing Use Cases
//!
//! Two views:
//! - `visible_to`: what the caller may see. Admin sees every project by
//!   rule - the bypass lives here, never as an ACL entry. A client sees
//!   only projects whose access list contains them.
//! - `available_to`: client-only catalogue of projects they do NOT have
//!   access to yet, annotated with whether a request is already pending so
//!   the UI can disable duplicate submission.

use std::collections::HashSet;
use std::sync::Arc;

use auth::{Identity, Role, authorize};
use kernel::id::ProjectId;

use crate::domain::entities::Project;
use crate::domain::repository::{AccessRequestRepository, ProjectRepository};
use crate::error::AccessResult;

/// A project the client could request access to
pub struct AvailableProject {
    pub project: Project,
    /// True if the client already has a pending request for it
    pub request_pending: bool,
}

/// Project listing use case
pub struct ListProjectsUseCase<P>
where
    P: ProjectRepository,
{
    projects: Arc<P>,
}

impl<P> ListProjectsUseCase<P>
where
    P: ProjectRepository,
{
    pub fn new(projects: Arc<P>) -> Self {
        Self { projects }
    }

    /// Projects visible to the caller
    pub async fn visible_to(&self, caller: &Identity) -> AccessResult<Vec<Project>> {
        match caller.role {
            Role::Admin => self.projects.list_all().await,
            Role::Client => self.projects.list_accessible_to(&caller.user_id).await,
        }
    }
}

/// Available-projects use case (client only)
pub struct AvailableProjectsUseCase<P, R>
where
    P: ProjectRepository,
    R: AccessRequestRepository,
{
    projects: Arc<P>,
    requests: Arc<R>,
}

impl<P, R> AvailableProjectsUseCase<P, R>
where
    P: ProjectRepository,
    R: AccessRequestRepository,
{
    pub fn new(projects: Arc<P>, requests: Arc<R>) -> Self {
        Self { projects, requests }
    }

    pub async fn execute(&self, caller: &Identity) -> AccessResult<Vec<AvailableProject>> {
        authorize::require_role(caller, Role::Client)?;

        let all_projects = self.projects.list_all().await?;
        let pending: HashSet<ProjectId> = self
            .requests
            .pending_project_ids(&caller.user_id)
            .await?
            .into_iter()
            .collect();

        Ok(all_projects
            .into_iter()
            .filter(|project| !project.is_accessible_to(&caller.user_id))
            .map(|project| AvailableProject {
                request_pending: pending.contains(&project.id),
                project,
            })
            .collect())
    }
}
