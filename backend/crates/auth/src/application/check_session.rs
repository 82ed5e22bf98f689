//! Check Session Use Case
//!
//! Resolves an opaque handle to the identity it was bound to at login.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::entity::{Identity, Session};
use crate::domain::repository::SessionRepository;
use crate::error::{AuthError, AuthResult};

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: SessionRepository,
{
    sessions: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(sessions: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { sessions, config }
    }

    /// Resolve a handle to the bound identity snapshot
    pub async fn resolve(&self, token: &str) -> AuthResult<Identity> {
        let session = self.get_session(token).await?;
        Ok(session.identity)
    }

    /// Just check whether a handle is currently valid
    pub async fn is_valid(&self, token: &str) -> bool {
        self.get_session(token).await.is_ok()
    }

    /// Verify the handle, fetch the session, and expire it if stale
    pub async fn get_session(&self, token: &str) -> AuthResult<Session> {
        let session_id = session_token::parse(token, &self.config.session_secret)
            .ok_or(AuthError::Unauthenticated)?;

        let session = self
            .sessions
            .find(session_id)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        if session.is_expired() {
            self.sessions.delete(session_id).await?;
            return Err(AuthError::Unauthenticated);
        }

        Ok(session)
    }
}
