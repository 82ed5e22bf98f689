//! Access Routers
//!
//! Both routers sit behind the auth `require_identity` middleware; role
//! checks happen in the use cases.

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use auth::AuthConfig;
use auth::domain::repository::SessionRepository;
use auth::presentation::middleware::{AuthMiddlewareState, require_identity};

use crate::domain::repository::{AccessRequestRepository, ProjectRepository};
use crate::presentation::handlers::{self, AccessAppState};

/// Project routes for authenticated callers
pub fn project_router<A, S>(repo: Arc<A>, sessions: Arc<S>, config: Arc<AuthConfig>) -> Router
where
    A: ProjectRepository + AccessRequestRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let state = AccessAppState { repo };
    let mw_state = AuthMiddlewareState { sessions, config };

    Router::new()
        .route("/", get(handlers::list_projects::<A>))
        .route("/all", get(handlers::available_projects::<A>))
        .route("/request-access", post(handlers::request_access::<A>))
        .route_layer(middleware::from_fn(
            move |req: axum::extract::Request, next: middleware::Next| {
                let mw_state = mw_state.clone();
                async move { require_identity(mw_state, req, next).await }
            },
        ))
        .with_state(state)
}

/// Admin routes for projects and request resolution
pub fn admin_access_router<A, S>(repo: Arc<A>, sessions: Arc<S>, config: Arc<AuthConfig>) -> Router
where
    A: ProjectRepository + AccessRequestRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let state = AccessAppState { repo };
    let mw_state = AuthMiddlewareState { sessions, config };

    Router::new()
        .route(
            "/projects",
            get(handlers::admin_list_projects::<A>).post(handlers::create_project::<A>),
        )
        .route("/requests", get(handlers::list_requests::<A>))
        .route(
            "/requests/{request_id}/approve",
            post(handlers::approve_request::<A>),
        )
        .route(
            "/requests/{request_id}/deny",
            post(handlers::deny_request::<A>),
        )
        .route_layer(middleware::from_fn(
            move |req: axum::extract::Request, next: middleware::Next| {
                let mw_state = mw_state.clone();
                async move { require_identity(mw_state, req, next).await }
            },
        ))
        .with_state(state)
}
