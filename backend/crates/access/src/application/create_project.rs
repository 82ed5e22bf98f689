//! Create Project Use Case
//!
//! Admin-only. New projects start with an empty access list.

use std::sync::Arc;

use auth::{Identity, Role, authorize};

use crate::domain::entities::Project;
use crate::domain::repository::ProjectRepository;
use crate::error::{AccessError, AccessResult};

/// Create project input
pub struct CreateProjectInput {
    pub name: String,
    pub description: String,
}

/// Create project use case
pub struct CreateProjectUseCase<P>
where
    P: ProjectRepository,
{
    projects: Arc<P>,
}

impl<P> CreateProjectUseCase<P>
where
    P: ProjectRepository,
{
    pub fn new(projects: Arc<P>) -> Self {
        Self { projects }
    }

    pub async fn execute(
        &self,
        caller: &Identity,
        input: CreateProjectInput,
    ) -> AccessResult<Project> {
        authorize::require_role(caller, Role::Admin)?;

        let name = input.name.trim();
        let description = input.description.trim();
        if name.is_empty() || description.is_empty() {
            return Err(AccessError::Validation(
                "Project name and description are required".to_string(),
            ));
        }

        let project = Project::new(name.to_string(), description.to_string(), caller.user_id);
        self.projects.create(&project).await?;

        tracing::info!(
            project_id = %project.id,
            created_by = %caller.user_id,
            "Project created"
        );

        Ok(project)
    }
}
