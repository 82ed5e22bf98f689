//! Access - Projects and the access-request lifecycle
//!
//! Clean Architecture structure:
//! - `domain/` - Project/AccessRequest entities, repository traits
//! - `application/` - use cases (create/list projects, request/resolve access)
//! - `infra/` - PostgreSQL repository
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Lifecycle
//! A client requests access to a project; an admin approves (granting a
//! set-add into the project's access list) or denies. `pending` is the only
//! non-terminal status, and at most one pending request exists per
//! (user, project) pair.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use domain::entities::{AccessRequest, Project, RequestStatus};
pub use error::{AccessError, AccessResult};
pub use infra::PgAccessRepository;
pub use presentation::router::{admin_access_router, project_router};
