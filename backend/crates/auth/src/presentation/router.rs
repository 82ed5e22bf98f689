//! Auth Routers

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::AuthConfig;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_identity};

/// Public auth routes: signup, login, logout, me
pub fn auth_router<U, S>(user_repo: Arc<U>, sessions: Arc<S>, config: Arc<AuthConfig>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let state = AuthAppState {
        user_repo,
        sessions,
        config,
    };

    Router::new()
        .route("/signup", post(handlers::sign_up::<U, S>))
        .route("/login", post(handlers::login::<U, S>))
        .route("/logout", post(handlers::logout::<U, S>))
        .route("/me", get(handlers::me::<U, S>))
        .with_state(state)
}

/// Admin user-management routes; session required, role checked in handlers
pub fn admin_user_router<U, S>(
    user_repo: Arc<U>,
    sessions: Arc<S>,
    config: Arc<AuthConfig>,
) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let state = AuthAppState {
        user_repo,
        sessions: sessions.clone(),
        config: config.clone(),
    };

    let mw_state = AuthMiddlewareState { sessions, config };

    Router::new()
        .route(
            "/users",
            get(handlers::list_users::<U, S>).post(handlers::create_user::<U, S>),
        )
        .route_layer(middleware::from_fn(
            move |req: axum::extract::Request, next: middleware::Next| {
                let mw_state = mw_state.clone();
                async move { require_identity(mw_state, req, next).await }
            },
        ))
        .with_state(state)
}
