//! User Name Value Object
//!
//! Login/display handle. Stored and compared in one canonical form:
//! NFKC-normalized, trimmed, lower-cased. `"Alice"` and `"alice"` are the
//! same user.
//!
//! The charset is intentionally loose - the original system let people use
//! their email address as a username - so only whitespace and control
//! characters are rejected.

use crate::error::{AuthError, AuthResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

/// User name value object (canonical form)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    /// Create a new user name with validation and canonicalization
    pub fn new(raw: impl Into<String>) -> AuthResult<Self> {
        let normalized: String = raw.into().nfkc().collect();
        let canonical = normalized.trim().to_lowercase();

        if canonical.is_empty() {
            return Err(AuthError::Validation(
                "Username cannot be empty".to_string(),
            ));
        }

        if canonical.chars().count() > USER_NAME_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "Username must be at most {} characters",
                USER_NAME_MAX_LENGTH
            )));
        }

        if canonical.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(AuthError::Validation(
                "Username cannot contain spaces".to_string(),
            ));
        }

        Ok(Self(canonical))
    }

    /// Restore from a stored value (already canonical)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the canonical user name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name_canonicalization() {
        assert_eq!(UserName::new("Alice").unwrap().as_str(), "alice");
        assert_eq!(UserName::new("  bob  ").unwrap().as_str(), "bob");
        assert_eq!(
            UserName::new("Alice@Example.COM").unwrap().as_str(),
            "alice@example.com"
        );
    }

    #[test]
    fn test_user_name_rejects_empty_and_whitespace() {
        assert!(UserName::new("").is_err());
        assert!(UserName::new("   ").is_err());
        assert!(UserName::new("two words").is_err());
        assert!(UserName::new("tab\tname").is_err());
    }

    #[test]
    fn test_user_name_rejects_too_long() {
        let long = "a".repeat(USER_NAME_MAX_LENGTH + 1);
        assert!(UserName::new(long).is_err());
        let ok = "a".repeat(USER_NAME_MAX_LENGTH);
        assert!(UserName::new(ok).is_ok());
    }

    #[test]
    fn test_same_user_regardless_of_case() {
        assert_eq!(
            UserName::new("Foo@Bar.com").unwrap(),
            UserName::new("foo@bar.com").unwrap()
        );
    }
}
