//! Application layer - use cases

pub mod create_project;
pub mod list_projects;
pub mod request_access;
pub mod resolve_request;

pub use create_project::{CreateProjectInput, CreateProjectUseCase};
pub use list_projects::{AvailableProject, AvailableProjectsUseCase, ListProjectsUseCase};
pub use request_access::RequestAccessUseCase;
pub use resolve_request::ResolveRequestUseCase;
