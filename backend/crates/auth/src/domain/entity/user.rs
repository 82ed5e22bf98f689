//! User Entity
//!
//! The full user record, including the password hash. Everything outside
//! the Authenticator works with [`Identity`], the hash-free view.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{Email, Role, UserName, UserPassword};

/// User entity
///
/// `username` and `email` are unique across all users, active or not.
/// `role` is fixed at creation; `is_active` is toggled by administrative
/// action outside this core, and login honors it.
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned, immutable
    pub id: UserId,
    /// Canonical (lower-cased), unique
    pub username: UserName,
    /// Canonical (lower-cased), unique
    pub email: Email,
    /// Never leaves the Authenticator boundary
    pub password_hash: UserPassword,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user
    pub fn new(username: UserName, email: Email, password_hash: UserPassword, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            username,
            email,
            password_hash,
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// The public identity view (no secret material)
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }

    /// Toggle account activation
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.updated_at = Utc::now();
    }
}

/// Public-facing identity
///
/// A point-in-time copy: sessions embed this value, so later changes to the
/// User record are not reflected in live sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub user_id: UserId,
    pub username: UserName,
    pub email: Email,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::RawPassword;

    fn sample_user() -> User {
        let raw = RawPassword::new("Passw0rd!".to_string()).unwrap();
        User::new(
            UserName::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
            UserPassword::from_raw(&raw).unwrap(),
            Role::Client,
        )
    }

    #[test]
    fn test_new_user_is_active() {
        let user = sample_user();
        assert!(user.is_active);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_identity_is_a_copy_without_secrets() {
        let user = sample_user();
        let identity = user.identity();
        assert_eq!(identity.user_id, user.id);
        assert_eq!(identity.username, user.username);
        assert_eq!(identity.role, Role::Client);
        // Debug output of the full user still redacts the hash
        assert!(!format!("{:?}", user).contains("argon2"));
    }

    #[test]
    fn test_set_active_touches_updated_at() {
        let mut user = sample_user();
        let before = user.updated_at;
        user.set_active(false);
        assert!(!user.is_active);
        assert!(user.updated_at >= before);
    }
}
