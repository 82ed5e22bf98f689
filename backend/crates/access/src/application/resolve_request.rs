//! Resolve Request Use Cases
//!
//! Admin approval/denial of access requests, plus the admin listing.
//!
//! Approval re-applies the status write even on an already-resolved request
//! (the resolution fields are overwritten); the ACL mutation is a store-level
//! set-add, so repeated approval never duplicates the entry. Denial never
//! touches the ACL.

use std::sync::Arc;

use auth::{Identity, Role, authorize};
use kernel::id::RequestId;

use crate::domain::entities::AccessRequest;
use crate::domain::repository::{AccessRequestRepository, ProjectRepository};
use crate::error::{AccessError, AccessResult};

/// Resolve request use case
pub struct ResolveRequestUseCase<P, R>
where
    P: ProjectRepository,
    R: AccessRequestRepository,
{
    projects: Arc<P>,
    requests: Arc<R>,
}

impl<P, R> ResolveRequestUseCase<P, R>
where
    P: ProjectRepository,
    R: AccessRequestRepository,
{
    pub fn new(projects: Arc<P>, requests: Arc<R>) -> Self {
        Self { projects, requests }
    }

    /// Approve a request and grant the requester access
    pub async fn approve(
        &self,
        caller: &Identity,
        request_id: RequestId,
    ) -> AccessResult<AccessRequest> {
        authorize::require_role(caller, Role::Admin)?;

        let mut request = self
            .requests
            .find_by_id(&request_id)
            .await?
            .ok_or(AccessError::RequestNotFound)?;

        request.approve(caller.user_id);
        self.requests.update(&request).await?;

        // Set-add; a no-op if already granted or the project is gone
        self.projects
            .grant_access(&request.project_id, &request.user_id)
            .await?;

        tracing::info!(
            request_id = %request.id,
            project_id = %request.project_id,
            user_id = %request.user_id,
            resolved_by = %caller.user_id,
            "Access request approved"
        );

        Ok(request)
    }

    /// Deny a request; the ACL is untouched
    pub async fn deny(
        &self,
        caller: &Identity,
        request_id: RequestId,
    ) -> AccessResult<AccessRequest> {
        authorize::require_role(caller, Role::Admin)?;

        let mut request = self
            .requests
            .find_by_id(&request_id)
            .await?
            .ok_or(AccessError::RequestNotFound)?;

        request.deny(caller.user_id);
        self.requests.update(&request).await?;

        tracing::info!(
            request_id = %request.id,
            project_id = %request.project_id,
            resolved_by = %caller.user_id,
            "Access request denied"
        );

        Ok(request)
    }

    /// All requests, most recent first (admin only)
    pub async fn list_all(&self, caller: &Identity) -> AccessResult<Vec<AccessRequest>> {
        authorize::require_role(caller, Role::Admin)?;
        self.requests.list_all().await
    }
}
