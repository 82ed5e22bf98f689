//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::AvailableProject;
use crate::domain::entities::{AccessRequest, Project};

// ============================================================================
// Projects
// ============================================================================

/// Project view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_by: String,
    pub accessible_by: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Project> for ProjectDto {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.to_string(),
            name: project.name.clone(),
            description: project.description.clone(),
            created_by: project.created_by.to_string(),
            accessible_by: project
                .accessible_by
                .iter()
                .map(|id| id.to_string())
                .collect(),
            created_at: project.created_at,
        }
    }
}

/// Project listing response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsResponse {
    pub success: bool,
    pub projects: Vec<ProjectDto>,
}

/// A project the client may request, with the pending-request flag the UI
/// uses to disable duplicate submission
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableProjectDto {
    #[serde(flatten)]
    pub project: ProjectDto,
    pub request_pending: bool,
}

impl From<&AvailableProject> for AvailableProjectDto {
    fn from(available: &AvailableProject) -> Self {
        Self {
            project: ProjectDto::from(&available.project),
            request_pending: available.request_pending,
        }
    }
}

/// Available-projects response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableProjectsResponse {
    pub success: bool,
    pub projects: Vec<AvailableProjectDto>,
}

/// Create project request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: String,
}

/// Create project response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectResponse {
    pub success: bool,
    pub message: String,
    pub project: ProjectDto,
}

// ============================================================================
// Access requests
// ============================================================================

/// Request-access request body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestAccessRequest {
    pub project_id: String,
}

/// Request-access response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestAccessResponse {
    pub success: bool,
    pub message: String,
}

/// Access request view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequestDto {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub project_id: String,
    pub project_name: String,
    pub status: String,
    pub requested_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolved_by: Option<String>,
}

impl From<&AccessRequest> for AccessRequestDto {
    fn from(request: &AccessRequest) -> Self {
        Self {
            id: request.id.to_string(),
            user_id: request.user_id.to_string(),
            user_name: request.user_name.clone(),
            user_email: request.user_email.clone(),
            project_id: request.project_id.to_string(),
            project_name: request.project_name.clone(),
            status: request.status.code().to_string(),
            requested_at: request.requested_at,
            resolved_at: request.resolved_at,
            resolved_by: request.resolved_by.map(|id| id.to_string()),
        }
    }
}

/// Admin request listing response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRequestsResponse {
    pub success: bool,
    pub requests: Vec<AccessRequestDto>,
}

/// Approve/deny response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequestResponse {
    pub success: bool,
    pub message: String,
}
