//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
///
/// The first five are semantic (the caller did something correctable);
/// the last three are operational and collapse to a generic
/// "operation failed" message at the boundary.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed input (empty field, bad email, weak password, bad role)
    #[error("{0}")]
    Validation(String),

    /// Username or email already taken (either match rejects)
    #[error("Username or email already exists")]
    DuplicateUser,

    /// Uniform login failure. Deliberately covers unknown user, wrong
    /// password and inactive account alike; the split is logged, never
    /// returned.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// No session, or the handle is unknown/expired
    #[error("Unauthorized. Please login to continue")]
    Unauthenticated,

    /// Authenticated but the role does not match the required one
    #[error("Access denied")]
    Forbidden,

    /// Password vault failure (entropy/resource exhaustion)
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// Store-layer fault
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Anything else unexpected
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::DuplicateUser => StatusCode::CONFLICT,
            AuthError::InvalidCredentials | AuthError::Unauthenticated => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::Hashing(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::DuplicateUser => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::Hashing(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError for the HTTP boundary
    ///
    /// Operational faults get a generic message so callers can tell
    /// "your input was wrong" from "try again later" and nothing more.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Hashing(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::new(self.kind(), "Operation failed. Please try again")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with the appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Hashing(msg) => {
                tracing::error!(message = %msg, "Password hashing failure");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::DuplicateUser.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::Forbidden.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_operational_faults_are_masked() {
        let err = AuthError::Internal("pool exhausted at 10.0.0.3".into());
        let app = err.to_app_error();
        assert!(!app.message().contains("10.0.0.3"));
        assert_eq!(app.status_code(), 500);
    }

    #[test]
    fn test_invalid_credentials_message_is_uniform() {
        // One observable message for all three internal causes
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid username or password"
        );
    }
}
