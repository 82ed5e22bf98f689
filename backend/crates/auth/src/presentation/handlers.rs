//! HTTP Handlers

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::sync::Arc;

use crate::application::{
    AuthConfig, CheckSessionUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput,
    SignUpUseCase,
};
use crate::domain::authorize;
use crate::domain::entity::Identity;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::Role;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CreatedUserDto, IdentityDto, ListUsersResponse, LoginRequest, LoginResponse, LogoutResponse,
    MeResponse, SignUpRequest, SignUpResponse, UserSummaryDto,
};

/// Shared state for auth handlers
pub struct AuthAppState<U, S>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    pub user_repo: Arc<U>,
    pub sessions: Arc<S>,
    pub config: Arc<AuthConfig>,
}

impl<U, S> Clone for AuthAppState<U, S>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            user_repo: self.user_repo.clone(),
            sessions: self.sessions.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<U, S>(
    State(state): State<AuthAppState<U, S>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.user_repo.clone());

    let output = use_case
        .execute(SignUpInput {
            username: req.username,
            email: req.email,
            password: req.password,
            role: req.role,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            success: true,
            message: "User created successfully".to_string(),
            user: CreatedUserDto::from(&output),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<U, S>(
    State(state): State<AuthAppState<U, S>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.user_repo.clone(),
        state.sessions.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            identifier: req.username,
            password: req.password,
        })
        .await?;

    let cookie = state
        .config
        .cookie_config()
        .build_set_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            success: true,
            message: "Login successful".to_string(),
            user: IdentityDto::from(&output.identity),
        }),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
///
/// Always reports success, even without a session.
pub async fn logout<U, S>(
    State(state): State<AuthAppState<U, S>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    if let Some(token) =
        platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name)
    {
        let use_case = SignOutUseCase::new(state.sessions.clone(), state.config.clone());
        // Destroy is idempotent; a store fault only means the entry outlives
        // the cookie until the sweep catches it
        if let Err(e) = use_case.execute(&token).await {
            tracing::warn!(error = %e, "Session destroy failed during logout");
        }
    }

    let clear_cookie = state.config.cookie_config().build_delete_cookie();

    (
        StatusCode::OK,
        [(header::SET_COOKIE, clear_cookie)],
        Json(LogoutResponse {
            success: true,
            message: "Logout successful".to_string(),
        }),
    )
}

// ============================================================================
// Who am I
// ============================================================================

/// GET /api/auth/me
pub async fn me<U, S>(
    State(state): State<AuthAppState<U, S>>,
    headers: HeaderMap,
) -> AuthResult<Json<MeResponse>>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name)
        .ok_or(AuthError::Unauthenticated)?;

    let use_case = CheckSessionUseCase::new(state.sessions.clone(), state.config.clone());
    let identity = use_case.resolve(&token).await?;

    Ok(Json(MeResponse {
        success: true,
        user: IdentityDto::from(&identity),
    }))
}

// ============================================================================
// Admin user management (behind require_identity)
// ============================================================================

/// GET /api/admin/users
pub async fn list_users<U, S>(
    State(state): State<AuthAppState<U, S>>,
    Extension(identity): Extension<Identity>,
) -> AuthResult<Json<ListUsersResponse>>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    authorize::require_role(&identity, Role::Admin)?;

    let users = state.user_repo.list_all().await?;

    Ok(Json(ListUsersResponse {
        success: true,
        users: users.iter().map(UserSummaryDto::from).collect(),
    }))
}

/// POST /api/admin/users
pub async fn create_user<U, S>(
    State(state): State<AuthAppState<U, S>>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    authorize::require_role(&identity, Role::Admin)?;

    let use_case = SignUpUseCase::new(state.user_repo.clone());

    let output = use_case
        .execute(SignUpInput {
            username: req.username,
            email: req.email,
            password: req.password,
            role: req.role,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            success: true,
            message: "User created successfully".to_string(),
            user: CreatedUserDto::from(&output),
        }),
    ))
}
