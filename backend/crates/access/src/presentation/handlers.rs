//! HTTP Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::sync::Arc;
use uuid::Uuid;

use auth::{Identity, Role, authorize};
use kernel::id::{ProjectId, RequestId};

use crate::application::{
    AvailableProjectsUseCase, CreateProjectInput, CreateProjectUseCase, ListProjectsUseCase,
    RequestAccessUseCase, ResolveRequestUseCase,
};
use crate::domain::repository::{AccessRequestRepository, ProjectRepository};
use crate::error::{AccessError, AccessResult};
use crate::presentation::dto::{
    AccessRequestDto, AvailableProjectDto, AvailableProjectsResponse, CreateProjectRequest,
    CreateProjectResponse, ListProjectsResponse, ListRequestsResponse, ProjectDto,
    RequestAccessRequest, RequestAccessResponse, ResolveRequestResponse,
};

/// Shared state for access handlers
///
/// One repository implements both traits (projects and requests live side
/// by side in the same store).
pub struct AccessAppState<A>
where
    A: ProjectRepository + AccessRequestRepository + Send + Sync + 'static,
{
    pub repo: Arc<A>,
}

impl<A> Clone for AccessAppState<A>
where
    A: ProjectRepository + AccessRequestRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

// ============================================================================
// Project listing
// ============================================================================

/// GET /api/projects
///
/// Admin: every project; Client: only projects granted to them.
pub async fn list_projects<A>(
    State(state): State<AccessAppState<A>>,
    Extension(identity): Extension<Identity>,
) -> AccessResult<Json<ListProjectsResponse>>
where
    A: ProjectRepository + AccessRequestRepository + Send + Sync + 'static,
{
    let use_case = ListProjectsUseCase::new(state.repo.clone());
    let projects = use_case.visible_to(&identity).await?;

    Ok(Json(ListProjectsResponse {
        success: true,
        projects: projects.iter().map(ProjectDto::from).collect(),
    }))
}

/// GET /api/projects/all
///
/// Client only: projects they do not have access to yet, annotated with
/// whether a request is already pending.
pub async fn available_projects<A>(
    State(state): State<AccessAppState<A>>,
    Extension(identity): Extension<Identity>,
) -> AccessResult<Json<AvailableProjectsResponse>>
where
    A: ProjectRepository + AccessRequestRepository + Send + Sync + 'static,
{
    let use_case = AvailableProjectsUseCase::new(state.repo.clone(), state.repo.clone());
    let available = use_case.execute(&identity).await?;

    Ok(Json(AvailableProjectsResponse {
        success: true,
        projects: available.iter().map(AvailableProjectDto::from).collect(),
    }))
}

// ============================================================================
// Access request submission
// ============================================================================

/// POST /api/projects/request-access
pub async fn request_access<A>(
    State(state): State<AccessAppState<A>>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<RequestAccessRequest>,
) -> AccessResult<impl IntoResponse>
where
    A: ProjectRepository + AccessRequestRepository + Send + Sync + 'static,
{
    if req.project_id.trim().is_empty() {
        return Err(AccessError::Validation("Project ID is required".to_string()));
    }

    let project_id = parse_project_id(&req.project_id)?;

    let use_case = RequestAccessUseCase::new(state.repo.clone(), state.repo.clone());
    use_case.execute(&identity, project_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(RequestAccessResponse {
            success: true,
            message: "Access request submitted successfully".to_string(),
        }),
    ))
}

// ============================================================================
// Admin: projects
// ============================================================================

/// GET /api/admin/projects
pub async fn admin_list_projects<A>(
    State(state): State<AccessAppState<A>>,
    Extension(identity): Extension<Identity>,
) -> AccessResult<Json<ListProjectsResponse>>
where
    A: ProjectRepository + AccessRequestRepository + Send + Sync + 'static,
{
    authorize::require_role(&identity, Role::Admin)?;

    let use_case = ListProjectsUseCase::new(state.repo.clone());
    let projects = use_case.visible_to(&identity).await?;

    Ok(Json(ListProjectsResponse {
        success: true,
        projects: projects.iter().map(ProjectDto::from).collect(),
    }))
}

/// POST /api/admin/projects
pub async fn create_project<A>(
    State(state): State<AccessAppState<A>>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<CreateProjectRequest>,
) -> AccessResult<impl IntoResponse>
where
    A: ProjectRepository + AccessRequestRepository + Send + Sync + 'static,
{
    let use_case = CreateProjectUseCase::new(state.repo.clone());
    let project = use_case
        .execute(
            &identity,
            CreateProjectInput {
                name: req.name,
                description: req.description,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateProjectResponse {
            success: true,
            message: "Project created successfully".to_string(),
            project: ProjectDto::from(&project),
        }),
    ))
}

// ============================================================================
// Admin: access requests
// ============================================================================

/// GET /api/admin/requests
pub async fn list_requests<A>(
    State(state): State<AccessAppState<A>>,
    Extension(identity): Extension<Identity>,
) -> AccessResult<Json<ListRequestsResponse>>
where
    A: ProjectRepository + AccessRequestRepository + Send + Sync + 'static,
{
    let use_case = ResolveRequestUseCase::new(state.repo.clone(), state.repo.clone());
    let requests = use_case.list_all(&identity).await?;

    Ok(Json(ListRequestsResponse {
        success: true,
        requests: requests.iter().map(AccessRequestDto::from).collect(),
    }))
}

/// POST /api/admin/requests/{requestId}/approve
pub async fn approve_request<A>(
    State(state): State<AccessAppState<A>>,
    Extension(identity): Extension<Identity>,
    Path(request_id): Path<String>,
) -> AccessResult<Json<ResolveRequestResponse>>
where
    A: ProjectRepository + AccessRequestRepository + Send + Sync + 'static,
{
    let request_id = parse_request_id(&request_id)?;

    let use_case = ResolveRequestUseCase::new(state.repo.clone(), state.repo.clone());
    use_case.approve(&identity, request_id).await?;

    Ok(Json(ResolveRequestResponse {
        success: true,
        message: "Access request approved successfully".to_string(),
    }))
}

/// POST /api/admin/requests/{requestId}/deny
pub async fn deny_request<A>(
    State(state): State<AccessAppState<A>>,
    Extension(identity): Extension<Identity>,
    Path(request_id): Path<String>,
) -> AccessResult<Json<ResolveRequestResponse>>
where
    A: ProjectRepository + AccessRequestRepository + Send + Sync + 'static,
{
    let request_id = parse_request_id(&request_id)?;

    let use_case = ResolveRequestUseCase::new(state.repo.clone(), state.repo.clone());
    use_case.deny(&identity, request_id).await?;

    Ok(Json(ResolveRequestResponse {
        success: true,
        message: "Access request denied successfully".to_string(),
    }))
}

// ============================================================================
// Helpers
// ============================================================================

/// An id that does not parse cannot reference an existing project
fn parse_project_id(raw: &str) -> AccessResult<ProjectId> {
    Uuid::parse_str(raw.trim())
        .map(ProjectId::from_uuid)
        .map_err(|_| AccessError::ProjectNotFound)
}

fn parse_request_id(raw: &str) -> AccessResult<RequestId> {
    Uuid::parse_str(raw.trim())
        .map(RequestId::from_uuid)
        .map_err(|_| AccessError::RequestNotFound)
}
