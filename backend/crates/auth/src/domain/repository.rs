//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the
//! infrastructure layer and are injected; there is no ambient store handle.

use crate::domain::entity::{Session, User};
use crate::domain::value_object::{Email, UserName};
use crate::error::AuthResult;
use kernel::id::UserId;
use uuid::Uuid;

/// User repository trait (the identity store)
///
/// Lookups match on the canonical (lower-cased) field. The pre-insert
/// uniqueness checks in the application layer are a fast path only; the
/// store's unique indexes are the source of truth, and `create` surfaces a
/// racing duplicate as `DuplicateUser`.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user; fails with `DuplicateUser` if a concurrent insert
    /// raced past the pre-check
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by canonical username
    async fn find_by_username(&self, username: &UserName) -> AuthResult<Option<User>>;

    /// Find user by canonical email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if a username is taken
    async fn exists_by_username(&self, username: &UserName) -> AuthResult<bool>;

    /// Check if an email is registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// All users, oldest first (admin surface)
    async fn list_all(&self) -> AuthResult<Vec<User>>;

    /// Toggle account activation (administrative action)
    async fn set_active(&self, user_id: &UserId, active: bool) -> AuthResult<()>;
}

/// Session repository trait (the session authority's backing store)
///
/// Sessions are independent keyed entries; concurrent creates for the same
/// user never merge or overwrite each other.
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Store a new session
    async fn create(&self, session: &Session) -> AuthResult<()>;

    /// Look up a session by ID
    async fn find(&self, session_id: Uuid) -> AuthResult<Option<Session>>;

    /// Remove a session; removing an unknown ID is not an error
    async fn delete(&self, session_id: Uuid) -> AuthResult<()>;

    /// Drop expired sessions, returning how many were removed
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
