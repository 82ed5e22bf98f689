//! Request Access Use Case
//!
//! A client asks to see a project. Creation order: role gate, project
//! existence, already-granted check, duplicate-pending check, insert. The
//! last two are check-then-act; the store's partial unique index on pending
//! (user, project) pairs is the backstop for requests that race past them.

use std::sync::Arc;

use auth::{Identity, Role, authorize};
use kernel::id::ProjectId;

use crate::domain::entities::AccessRequest;
use crate::domain::repository::{AccessRequestRepository, ProjectRepository};
use crate::error::{AccessError, AccessResult};

/// Request access use case
pub struct RequestAccessUseCase<P, R>
where
    P: ProjectRepository,
    R: AccessRequestRepository,
{
    projects: Arc<P>,
    requests: Arc<R>,
}

impl<P, R> RequestAccessUseCase<P, R>
where
    P: ProjectRepository,
    R: AccessRequestRepository,
{
    pub fn new(projects: Arc<P>, requests: Arc<R>) -> Self {
        Self { projects, requests }
    }

    pub async fn execute(
        &self,
        caller: &Identity,
        project_id: ProjectId,
    ) -> AccessResult<AccessRequest> {
        authorize::require_role(caller, Role::Client)?;

        let project = self
            .projects
            .find_by_id(&project_id)
            .await?
            .ok_or(AccessError::ProjectNotFound)?;

        if project.is_accessible_to(&caller.user_id) {
            return Err(AccessError::AlreadyGranted);
        }

        if self
            .requests
            .has_pending(&caller.user_id, &project_id)
            .await?
        {
            return Err(AccessError::DuplicatePending);
        }

        let request = AccessRequest::new(caller, &project);
        self.requests.create(&request).await?;

        tracing::info!(
            request_id = %request.id,
            user_id = %caller.user_id,
            project_id = %project_id,
            "Access request submitted"
        );

        Ok(request)
    }
}
