//! Session Entity
//!
//! Ties an opaque handle to an authenticated identity. Held by the session
//! authority in process memory, not in the document store.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::entity::user::Identity;

/// Session entity
///
/// `identity` is a point-in-time copy taken at login. Later changes to the
/// User record (including deactivation) do not propagate into it.
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID (UUID v4); the signed handle wraps this
    pub session_id: Uuid,
    /// Identity snapshot taken at login
    pub identity: Identity,
    /// Expiry (Unix timestamp ms)
    pub expires_at_ms: i64,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session with the given TTL
    pub fn new(identity: Identity, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4(),
            identity,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
        }
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }
}
