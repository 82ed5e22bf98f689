//! Sign In Use Case
//!
//! Authenticates a user and creates a session.
//!
//! Every failure - unknown identifier, inactive account, wrong password -
//! collapses into the same `InvalidCredentials` outcome. The distinction is
//! logged for operators and never surfaced to the caller.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::entity::{Identity, Session};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{Email, RawPassword, UserName};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    /// User name or email
    pub identifier: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub identity: Identity,
    /// Signed handle for the session cookie
    pub session_token: String,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    sessions: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, sessions: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            sessions,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        if input.identifier.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        // Look up by username first; if absent and the identifier is a
        // syntactically valid email, retry by email.
        let mut user = match UserName::new(&input.identifier) {
            Ok(username) => self.user_repo.find_by_username(&username).await?,
            Err(_) => None,
        };

        if user.is_none() {
            if let Ok(email) = Email::new(&input.identifier) {
                user = self.user_repo.find_by_email(&email).await?;
            }
        }

        let Some(user) = user else {
            tracing::warn!("Login attempt for unknown identifier");
            return Err(AuthError::InvalidCredentials);
        };

        if !user.is_active {
            tracing::warn!(user_id = %user.id, "Login attempt on inactive account");
            return Err(AuthError::InvalidCredentials);
        }

        // No policy check here: verify whatever was stored
        let raw_password = RawPassword::new_unchecked(input.password);
        if !user.password_hash.verify(&raw_password) {
            tracing::warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let ttl = chrono::Duration::from_std(self.config.session_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?;

        let session = Session::new(user.identity(), ttl);
        self.sessions.create(&session).await?;

        let session_token = session_token::issue(session.session_id, &self.config.session_secret);

        tracing::info!(
            user_id = %user.id,
            session_id = %session.session_id,
            "User signed in"
        );

        Ok(SignInOutput {
            identity: user.identity(),
            session_token,
        })
    }
}
