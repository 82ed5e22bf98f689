//! In-Memory Session Store
//!
//! Sessions live with the process, not in the document store. Each session
//! is an independent keyed entry, so concurrent logins for the same user
//! never touch each other's state.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::Session;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

/// In-memory session store
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a background task that periodically drops expired sessions
    pub fn spawn_cleanup(&self, interval: Duration) {
        let store = self.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;

                match SessionRepository::cleanup_expired(&store).await {
                    Ok(0) => {}
                    Ok(removed) => {
                        tracing::info!(sessions_removed = removed, "Expired sessions cleaned up");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Session cleanup failed");
                    }
                }
            }
        });
    }

    /// Number of live entries (expired ones included until the next sweep)
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl SessionRepository for InMemorySessionStore {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find(&self, session_id: Uuid) -> AuthResult<Option<Session>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&session_id).cloned())
    }

    async fn delete(&self, session_id: Uuid) -> AuthResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired());
        Ok((before - sessions.len()) as u64)
    }
}
