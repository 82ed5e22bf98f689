//! Use-case tests for the access crate
//!
//! Drives the request -> approve/deny lifecycle against an in-memory
//! repository that mimics the store's atomic set-add and the
//! pending-uniqueness backstop.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use auth::domain::value_object::{Email, UserName};
use auth::{Identity, Role};
use kernel::id::{ProjectId, RequestId, UserId};

use crate::application::{
    AvailableProjectsUseCase, CreateProjectInput, CreateProjectUseCase, ListProjectsUseCase,
    RequestAccessUseCase, ResolveRequestUseCase,
};
use crate::domain::entities::{AccessRequest, Project, RequestStatus};
use crate::domain::repository::{AccessRequestRepository, ProjectRepository};
use crate::error::{AccessError, AccessResult};

// ============================================================================
// In-memory repository double
// ============================================================================

#[derive(Clone, Default)]
struct InMemoryAccessRepository {
    projects: Arc<RwLock<HashMap<Uuid, Project>>>,
    requests: Arc<RwLock<HashMap<Uuid, AccessRequest>>>,
}

impl ProjectRepository for InMemoryAccessRepository {
    async fn create(&self, project: &Project) -> AccessResult<()> {
        self.projects
            .write()
            .await
            .insert(project.id.into_uuid(), project.clone());
        Ok(())
    }

    async fn find_by_id(&self, project_id: &ProjectId) -> AccessResult<Option<Project>> {
        Ok(self.projects.read().await.get(project_id.as_uuid()).cloned())
    }

    async fn list_all(&self) -> AccessResult<Vec<Project>> {
        let mut projects: Vec<Project> = self.projects.read().await.values().cloned().collect();
        projects.sort_by_key(|p| p.created_at);
        Ok(projects)
    }

    async fn list_accessible_to(&self, user_id: &UserId) -> AccessResult<Vec<Project>> {
        let mut projects: Vec<Project> = self
            .projects
            .read()
            .await
            .values()
            .filter(|p| p.is_accessible_to(user_id))
            .cloned()
            .collect();
        projects.sort_by_key(|p| p.created_at);
        Ok(projects)
    }

    async fn grant_access(&self, project_id: &ProjectId, user_id: &UserId) -> AccessResult<()> {
        // Set-add under one lock, like the store's atomic update; missing
        // project is a no-op
        let mut projects = self.projects.write().await;
        if let Some(project) = projects.get_mut(project_id.as_uuid()) {
            project.grant_access(*user_id);
        }
        Ok(())
    }
}

impl AccessRequestRepository for InMemoryAccessRepository {
    async fn create(&self, request: &AccessRequest) -> AccessResult<()> {
        let mut requests = self.requests.write().await;
        // Partial-unique-index backstop
        if requests.values().any(|r| {
            r.user_id == request.user_id
                && r.project_id == request.project_id
                && r.is_pending()
        }) {
            return Err(AccessError::DuplicatePending);
        }
        requests.insert(request.id.into_uuid(), request.clone());
        Ok(())
    }

    async fn find_by_id(&self, request_id: &RequestId) -> AccessResult<Option<AccessRequest>> {
        Ok(self.requests.read().await.get(request_id.as_uuid()).cloned())
    }

    async fn has_pending(&self, user_id: &UserId, project_id: &ProjectId) -> AccessResult<bool> {
        Ok(self
            .requests
            .read()
            .await
            .values()
            .any(|r| &r.user_id == user_id && &r.project_id == project_id && r.is_pending()))
    }

    async fn pending_project_ids(&self, user_id: &UserId) -> AccessResult<Vec<ProjectId>> {
        Ok(self
            .requests
            .read()
            .await
            .values()
            .filter(|r| &r.user_id == user_id && r.is_pending())
            .map(|r| r.project_id)
            .collect())
    }

    async fn list_all(&self) -> AccessResult<Vec<AccessRequest>> {
        let mut requests: Vec<AccessRequest> =
            self.requests.read().await.values().cloned().collect();
        requests.sort_by(|a, b| b.requested_at.cmp(&a.requested_at));
        Ok(requests)
    }

    async fn update(&self, request: &AccessRequest) -> AccessResult<()> {
        self.requests
            .write()
            .await
            .insert(request.id.into_uuid(), request.clone());
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn identity(name: &str, role: Role) -> Identity {
    Identity {
        user_id: UserId::new(),
        username: UserName::new(name).unwrap(),
        email: Email::new(format!("{name}@example.com")).unwrap(),
        role,
    }
}

struct Fixture {
    repo: Arc<InMemoryAccessRepository>,
    admin: Identity,
    client: Identity,
}

impl Fixture {
    fn new() -> Self {
        Self {
            repo: Arc::new(InMemoryAccessRepository::default()),
            admin: identity("boss", Role::Admin),
            client: identity("carol", Role::Client),
        }
    }

    async fn create_project(&self, name: &str) -> Project {
        CreateProjectUseCase::new(self.repo.clone())
            .execute(
                &self.admin,
                CreateProjectInput {
                    name: name.to_string(),
                    description: format!("{name} description"),
                },
            )
            .await
            .unwrap()
    }

    fn request_access(&self) -> RequestAccessUseCase<InMemoryAccessRepository, InMemoryAccessRepository> {
        RequestAccessUseCase::new(self.repo.clone(), self.repo.clone())
    }

    fn resolve(&self) -> ResolveRequestUseCase<InMemoryAccessRepository, InMemoryAccessRepository> {
        ResolveRequestUseCase::new(self.repo.clone(), self.repo.clone())
    }

    fn listing(&self) -> ListProjectsUseCase<InMemoryAccessRepository> {
        ListProjectsUseCase::new(self.repo.clone())
    }

    fn available(&self) -> AvailableProjectsUseCase<InMemoryAccessRepository, InMemoryAccessRepository> {
        AvailableProjectsUseCase::new(self.repo.clone(), self.repo.clone())
    }

    /// Fetch a project back; qualified because both repo traits name a
    /// `find_by_id`
    async fn project(&self, id: &ProjectId) -> Project {
        ProjectRepository::find_by_id(&*self.repo, id)
            .await
            .unwrap()
            .unwrap()
    }
}

// ============================================================================
// Project creation and listing
// ============================================================================

#[tokio::test]
async fn only_admins_create_projects() {
    let fx = Fixture::new();

    let err = CreateProjectUseCase::new(fx.repo.clone())
        .execute(
            &fx.client,
            CreateProjectInput {
                name: "P".into(),
                description: "d".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Forbidden));

    let project = fx.create_project("Apollo").await;
    assert!(project.accessible_by.is_empty());
    assert_eq!(project.created_by, fx.admin.user_id);
}

#[tokio::test]
async fn project_creation_requires_name_and_description() {
    let fx = Fixture::new();

    let err = CreateProjectUseCase::new(fx.repo.clone())
        .execute(
            &fx.admin,
            CreateProjectInput {
                name: "  ".into(),
                description: "d".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Validation(_)));
}

#[tokio::test]
async fn admin_sees_all_projects_client_sees_only_granted() {
    let fx = Fixture::new();
    let apollo = fx.create_project("Apollo").await;
    let _gemini = fx.create_project("Gemini").await;

    // Admin bypass is a listing rule, not an ACL entry
    let admin_view = fx.listing().visible_to(&fx.admin).await.unwrap();
    assert_eq!(admin_view.len(), 2);
    assert!(admin_view.iter().all(|p| p.accessible_by.is_empty()));

    let client_view = fx.listing().visible_to(&fx.client).await.unwrap();
    assert!(client_view.is_empty());

    fx.repo
        .grant_access(&apollo.id, &fx.client.user_id)
        .await
        .unwrap();
    let client_view = fx.listing().visible_to(&fx.client).await.unwrap();
    assert_eq!(client_view.len(), 1);
    assert_eq!(client_view[0].name, "Apollo");
}

// ============================================================================
// Request submission
// ============================================================================

#[tokio::test]
async fn client_request_creates_pending_entry() {
    let fx = Fixture::new();
    let project = fx.create_project("Apollo").await;

    let request = fx
        .request_access()
        .execute(&fx.client, project.id)
        .await
        .unwrap();

    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.user_name, "carol");
    assert_eq!(request.project_name, "Apollo");
}

#[tokio::test]
async fn admins_cannot_request_access() {
    let fx = Fixture::new();
    let project = fx.create_project("Apollo").await;

    let err = fx
        .request_access()
        .execute(&fx.admin, project.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Forbidden));
}

#[tokio::test]
async fn request_for_unknown_project_fails() {
    let fx = Fixture::new();

    let err = fx
        .request_access()
        .execute(&fx.client, ProjectId::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::ProjectNotFound));
}

#[tokio::test]
async fn request_when_already_granted_fails() {
    let fx = Fixture::new();
    let project = fx.create_project("Apollo").await;
    fx.repo
        .grant_access(&project.id, &fx.client.user_id)
        .await
        .unwrap();

    let err = fx
        .request_access()
        .execute(&fx.client, project.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::AlreadyGranted));
}

#[tokio::test]
async fn duplicate_pending_request_is_suppressed() {
    let fx = Fixture::new();
    let project = fx.create_project("Apollo").await;

    fx.request_access()
        .execute(&fx.client, project.id)
        .await
        .unwrap();

    let err = fx
        .request_access()
        .execute(&fx.client, project.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::DuplicatePending));

    // A different client is unaffected
    let other = identity("dave", Role::Client);
    assert!(fx.request_access().execute(&other, project.id).await.is_ok());
}

#[tokio::test]
async fn new_request_allowed_after_denial() {
    let fx = Fixture::new();
    let project = fx.create_project("Apollo").await;

    let first = fx
        .request_access()
        .execute(&fx.client, project.id)
        .await
        .unwrap();
    fx.resolve().deny(&fx.admin, first.id).await.unwrap();

    // The pending slot is free again
    let second = fx
        .request_access()
        .execute(&fx.client, project.id)
        .await
        .unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(second.status, RequestStatus::Pending);
}

// ============================================================================
// Resolution
// ============================================================================

#[tokio::test]
async fn approval_grants_access_and_resolves_request() {
    let fx = Fixture::new();
    let project = fx.create_project("Apollo").await;

    let request = fx
        .request_access()
        .execute(&fx.client, project.id)
        .await
        .unwrap();

    let resolved = fx.resolve().approve(&fx.admin, request.id).await.unwrap();
    assert_eq!(resolved.status, RequestStatus::Approved);
    assert_eq!(resolved.resolved_by, Some(fx.admin.user_id));
    assert!(resolved.resolved_at.is_some());

    let project = fx.project(&project.id).await;
    assert!(project.is_accessible_to(&fx.client.user_id));

    // The client's listing now includes the project
    let client_view = fx.listing().visible_to(&fx.client).await.unwrap();
    assert_eq!(client_view.len(), 1);
    assert_eq!(client_view[0].name, "Apollo");
}

#[tokio::test]
async fn double_approval_leaves_one_acl_entry() {
    let fx = Fixture::new();
    let project = fx.create_project("Apollo").await;

    let request = fx
        .request_access()
        .execute(&fx.client, project.id)
        .await
        .unwrap();

    fx.resolve().approve(&fx.admin, request.id).await.unwrap();
    fx.resolve().approve(&fx.admin, request.id).await.unwrap();

    let project = fx.project(&project.id).await;
    assert_eq!(
        project
            .accessible_by
            .iter()
            .filter(|&&u| u == fx.client.user_id)
            .count(),
        1
    );
}

#[tokio::test]
async fn denial_never_touches_the_acl() {
    let fx = Fixture::new();
    let project = fx.create_project("Apollo").await;

    let request = fx
        .request_access()
        .execute(&fx.client, project.id)
        .await
        .unwrap();
    let resolved = fx.resolve().deny(&fx.admin, request.id).await.unwrap();
    assert_eq!(resolved.status, RequestStatus::Denied);

    let project = fx.project(&project.id).await;
    assert!(!project.is_accessible_to(&fx.client.user_id));
}

#[tokio::test]
async fn resolving_unknown_request_fails() {
    let fx = Fixture::new();

    assert!(matches!(
        fx.resolve().approve(&fx.admin, RequestId::new()).await,
        Err(AccessError::RequestNotFound)
    ));
    assert!(matches!(
        fx.resolve().deny(&fx.admin, RequestId::new()).await,
        Err(AccessError::RequestNotFound)
    ));
}

#[tokio::test]
async fn clients_cannot_resolve_or_list_requests() {
    let fx = Fixture::new();
    let project = fx.create_project("Apollo").await;
    let request = fx
        .request_access()
        .execute(&fx.client, project.id)
        .await
        .unwrap();

    assert!(matches!(
        fx.resolve().approve(&fx.client, request.id).await,
        Err(AccessError::Forbidden)
    ));
    assert!(matches!(
        fx.resolve().deny(&fx.client, request.id).await,
        Err(AccessError::Forbidden)
    ));
    assert!(matches!(
        fx.resolve().list_all(&fx.client).await,
        Err(AccessError::Forbidden)
    ));
}

#[tokio::test]
async fn approval_with_project_gone_still_resolves() {
    let fx = Fixture::new();
    let project = fx.create_project("Apollo").await;
    let request = fx
        .request_access()
        .execute(&fx.client, project.id)
        .await
        .unwrap();

    fx.repo.projects.write().await.remove(project.id.as_uuid());

    let resolved = fx.resolve().approve(&fx.admin, request.id).await.unwrap();
    assert_eq!(resolved.status, RequestStatus::Approved);
}

// ============================================================================
// Listings
// ============================================================================

#[tokio::test]
async fn request_listing_is_admin_only_most_recent_first() {
    let fx = Fixture::new();
    let apollo = fx.create_project("Apollo").await;
    let gemini = fx.create_project("Gemini").await;

    fx.request_access()
        .execute(&fx.client, apollo.id)
        .await
        .unwrap();
    fx.request_access()
        .execute(&fx.client, gemini.id)
        .await
        .unwrap();

    let requests = fx.resolve().list_all(&fx.admin).await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].requested_at >= requests[1].requested_at);
    assert_eq!(requests[0].project_name, "Gemini");
}

#[tokio::test]
async fn available_projects_excludes_granted_and_flags_pending() {
    let fx = Fixture::new();
    let apollo = fx.create_project("Apollo").await;
    let gemini = fx.create_project("Gemini").await;
    let _mercury = fx.create_project("Mercury").await;

    // Granted: Apollo. Pending: Gemini. Untouched: Mercury.
    fx.repo
        .grant_access(&apollo.id, &fx.client.user_id)
        .await
        .unwrap();
    fx.request_access()
        .execute(&fx.client, gemini.id)
        .await
        .unwrap();

    let available = fx.available().execute(&fx.client).await.unwrap();
    assert_eq!(available.len(), 2);

    let gemini_entry = available
        .iter()
        .find(|a| a.project.name == "Gemini")
        .unwrap();
    assert!(gemini_entry.request_pending);

    let mercury_entry = available
        .iter()
        .find(|a| a.project.name == "Mercury")
        .unwrap();
    assert!(!mercury_entry.request_pending);

    // Admins have no "available" view
    assert!(matches!(
        fx.available().execute(&fx.admin).await,
        Err(AccessError::Forbidden)
    ));
}
