//! Auth - Identity & Access Control core
//!
//! Clean Architecture structure:
//! - `domain/` - entities, value objects, repository traits, authorization gate
//! - `application/` - use cases (sign up, sign in, sign out, check session)
//! - `infra/` - PostgreSQL user store, in-memory session store
//! - `presentation/` - HTTP handlers, DTOs, middleware, routers
//!
//! ## Features
//! - Signup/login with username-or-email + password
//! - Server-side sessions behind HMAC-signed cookie handles
//! - Closed role set (Admin, Client) with a strict-equality gate
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never stored or logged in clear
//! - Login failures are indistinguishable to the caller (anti-enumeration)
//! - Uniqueness enforced by store indexes, application checks are fast paths

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::authorize;
pub use domain::entity::{Identity, Session, User};
pub use domain::value_object::Role;
pub use error::{AuthError, AuthResult};
pub use infra::{InMemorySessionStore, PgUserRepository};
pub use presentation::router::{admin_user_router, auth_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
