//! Auth Middleware
//!
//! Resolves the session cookie into an [`Identity`] request extension, or
//! rejects with 401. Role checks happen after this, in the handlers, via
//! `domain::authorize`.

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::{AuthConfig, CheckSessionUseCase};
use crate::domain::repository::SessionRepository;
use crate::error::AuthError;

/// Middleware state
pub struct AuthMiddlewareState<S>
where
    S: SessionRepository + Send + Sync + 'static,
{
    pub sessions: Arc<S>,
    pub config: Arc<AuthConfig>,
}

impl<S> Clone for AuthMiddlewareState<S>
where
    S: SessionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            config: self.config.clone(),
        }
    }
}

/// Require a valid session; insert its identity snapshot for handlers
pub async fn require_identity<S>(
    state: AuthMiddlewareState<S>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    S: SessionRepository + Send + Sync + 'static,
{
    let token =
        platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.sessions.clone(), state.config.clone());

    let identity = match token {
        Some(token) => use_case.resolve(&token).await.ok(),
        None => None,
    };

    match identity {
        Some(identity) => {
            req.extensions_mut().insert(identity);
            Ok(next.run(req).await)
        }
        None => Err(AuthError::Unauthenticated.into_response()),
    }
}
