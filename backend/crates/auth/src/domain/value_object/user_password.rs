//! User Password Value Object
//!
//! Domain wrapper over `platform::password`. Two types with distinct roles:
//! - [`RawPassword`] - plaintext from user input, zeroized on drop
//! - [`UserPassword`] - the stored hash, safe to persist
//!
//! The plaintext never crosses this module's boundary: it enters as a
//! `RawPassword`, leaves as a hash or a bool.

use crate::error::{AuthError, AuthResult};
use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};
use std::fmt;

// ============================================================================
// Raw Password (user input)
// ============================================================================

/// Raw password from user input
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create with the signup composition policy applied
    ///
    /// Length >= 8, at least one uppercase, one lowercase, one digit and one
    /// special character.
    pub fn new(raw: String) -> AuthResult<Self> {
        let clear_text =
            ClearTextPassword::new(raw).map_err(|e| AuthError::Validation(e.to_string()))?;
        Ok(Self(clear_text))
    }

    /// Create without policy checks
    ///
    /// Login must verify whatever the user stored, not what today's policy
    /// would accept.
    pub fn new_unchecked(raw: String) -> Self {
        Self(ClearTextPassword::new_unchecked(raw))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (hashed, for storage)
// ============================================================================

/// Hashed user password for database storage
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password
    pub fn from_raw(raw: &RawPassword) -> AuthResult<Self> {
        let hashed = raw.inner().hash().map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => AuthError::Hashing(msg),
            _ => AuthError::Internal("Unexpected error during password hashing".to_string()),
        })?;

        Ok(Self(hashed))
    }

    /// Restore from a PHC string out of the database
    pub fn from_phc_string(phc: impl Into<String>) -> AuthResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc)
            .map_err(|_| AuthError::Internal("Invalid password hash in database".to_string()))?;
        Ok(Self(hashed))
    }

    /// PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash
    ///
    /// Yes/no only; the caller never learns which check failed.
    pub fn verify(&self, raw: &RawPassword) -> bool {
        self.0.verify(raw.inner())
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
