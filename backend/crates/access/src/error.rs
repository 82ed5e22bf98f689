//! Access Error Types
//!
//! Errors for the project / access-request domain, integrated with the
//! unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Access-specific result type alias
pub type AccessResult<T> = Result<T, AccessError>;

/// Access-specific error variants
#[derive(Debug, Error)]
pub enum AccessError {
    /// Malformed input
    #[error("{0}")]
    Validation(String),

    /// Caller's role does not permit this operation
    #[error("Access denied")]
    Forbidden,

    /// Referenced project does not exist
    #[error("Project not found")]
    ProjectNotFound,

    /// Referenced access request does not exist
    #[error("Request not found")]
    RequestNotFound,

    /// Client already appears in the project's access list
    #[error("You already have access to this project")]
    AlreadyGranted,

    /// A pending request for this (user, project) pair already exists
    #[error("You already have a pending request for this project")]
    DuplicatePending,

    /// Store-layer fault
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Anything else unexpected
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccessError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccessError::Validation(_) => StatusCode::BAD_REQUEST,
            AccessError::Forbidden => StatusCode::FORBIDDEN,
            AccessError::ProjectNotFound | AccessError::RequestNotFound => StatusCode::NOT_FOUND,
            AccessError::AlreadyGranted | AccessError::DuplicatePending => StatusCode::CONFLICT,
            AccessError::Database(_) | AccessError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccessError::Validation(_) => ErrorKind::BadRequest,
            AccessError::Forbidden => ErrorKind::Forbidden,
            AccessError::ProjectNotFound | AccessError::RequestNotFound => ErrorKind::NotFound,
            AccessError::AlreadyGranted | AccessError::DuplicatePending => ErrorKind::Conflict,
            AccessError::Database(_) | AccessError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError for the HTTP boundary
    ///
    /// Operational faults get a generic message; semantic errors keep theirs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AccessError::Database(_) | AccessError::Internal(_) => {
                AppError::new(self.kind(), "Operation failed. Please try again")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            AccessError::Database(e) => {
                tracing::error!(error = %e, "Access database error");
            }
            AccessError::Internal(msg) => {
                tracing::error!(message = %msg, "Access internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Access error");
            }
        }
    }
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// Gate failures from the auth crate flow through unchanged in meaning
impl From<auth::AuthError> for AccessError {
    fn from(err: auth::AuthError) -> Self {
        match err {
            auth::AuthError::Forbidden => AccessError::Forbidden,
            auth::AuthError::Unauthenticated => AccessError::Forbidden,
            other => AccessError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AccessError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AccessError::ProjectNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AccessError::RequestNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AccessError::AlreadyGranted.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AccessError::DuplicatePending.status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_operational_faults_are_masked() {
        let err = AccessError::Internal("connection refused 10.1.2.3:5432".into());
        assert!(!err.to_app_error().message().contains("10.1.2.3"));
    }
}
