//! Sign Out Use Case
//!
//! Destroys a session. Idempotent: an unknown, malformed or already-expired
//! handle is not an error, so logout always succeeds.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRepository,
{
    sessions: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(sessions: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { sessions, config }
    }

    pub async fn execute(&self, token: &str) -> AuthResult<()> {
        if let Some(session_id) = session_token::parse(token, &self.config.session_secret) {
            self.sessions.delete(session_id).await?;
            tracing::info!(session_id = %session_id, "Session destroyed");
        }
        Ok(())
    }
}
