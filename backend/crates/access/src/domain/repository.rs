//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in the
//! infrastructure layer.

use crate::domain::entities::{AccessRequest, Project};
use crate::error::AccessResult;
use kernel::id::{ProjectId, RequestId, UserId};

/// Project repository trait
#[trait_variant::make(ProjectRepository: Send)]
pub trait LocalProjectRepository {
    /// Create a new project
    async fn create(&self, project: &Project) -> AccessResult<()>;

    /// Find project by ID
    async fn find_by_id(&self, project_id: &ProjectId) -> AccessResult<Option<Project>>;

    /// All projects, oldest first
    async fn list_all(&self) -> AccessResult<Vec<Project>>;

    /// Projects whose access list contains `user_id`
    async fn list_accessible_to(&self, user_id: &UserId) -> AccessResult<Vec<Project>>;

    /// Add `user_id` to the project's access list if absent
    ///
    /// A single atomic set-add at the store; never appends a duplicate, and
    /// a missing project is a no-op.
    async fn grant_access(&self, project_id: &ProjectId, user_id: &UserId) -> AccessResult<()>;
}

/// Access request repository trait
#[trait_variant::make(AccessRequestRepository: Send)]
pub trait LocalAccessRequestRepository {
    /// Create a new request; fails with `DuplicatePending` if a concurrent
    /// request for the same (user, project) pair raced past the pre-check
    async fn create(&self, request: &AccessRequest) -> AccessResult<()>;

    /// Find request by ID
    async fn find_by_id(&self, request_id: &RequestId) -> AccessResult<Option<AccessRequest>>;

    /// Whether a pending request exists for the (user, project) pair
    async fn has_pending(&self, user_id: &UserId, project_id: &ProjectId) -> AccessResult<bool>;

    /// Project ids the user has a pending request for
    async fn pending_project_ids(&self, user_id: &UserId) -> AccessResult<Vec<ProjectId>>;

    /// All requests, most recent first
    async fn list_all(&self) -> AccessResult<Vec<AccessRequest>>;

    /// Write back a resolved request's status fields
    async fn update(&self, request: &AccessRequest) -> AccessResult<()>;
}
