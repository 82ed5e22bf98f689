//! Password Policy, Strength and Hashing
//!
//! One-way handling of user secrets:
//! - Composition policy (length + character classes)
//! - Advisory strength scoring
//! - Argon2id hashing with random salts (PHC string format)
//! - Zeroization of plaintext material
//!
//! Verification is a plain yes/no. Callers never learn whether a failure
//! came from the policy, the format, or the hash comparison.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length (characters)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length (characters)
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Special characters accepted by the composition policy
pub const SPECIAL_CHARS: &str = "@$!%*?&#";

// ============================================================================
// Error Types
// ============================================================================

/// Composition policy violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password cannot be empty")]
    Empty,

    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,

    #[error("Password must contain at least one digit")]
    MissingDigit,

    #[error("Password must contain at least one special character ({SPECIAL_CHARS})")]
    MissingSpecial,
}

/// Hashing/verification faults
///
/// `HashingFailed` is the only variant a healthy system produces, and only
/// on entropy or resource exhaustion in the underlying hasher.
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Strength (advisory only)
// ============================================================================

/// Five-level advisory password strength
///
/// Never blocks an operation; the composition policy does that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordStrength {
    Weak,
    Fair,
    Good,
    VeryGood,
    Strong,
}

impl PasswordStrength {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Fair => "fair",
            Self::Good => "good",
            Self::VeryGood => "very-good",
            Self::Strong => "strong",
        }
    }
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Score a candidate password
///
/// Weighted over length tiers (8/10/12) and character-class variety. Works
/// on any input, including passwords the policy would reject.
pub fn password_strength(raw: &str) -> PasswordStrength {
    if raw.is_empty() {
        return PasswordStrength::Weak;
    }

    let length = raw.chars().count();
    let mut score = 0u8;

    // Length tiers
    if length >= 8 {
        score += 1;
    }
    if length >= 10 {
        score += 1;
    }
    if length >= 12 {
        score += 1;
    }

    // Class variety
    if raw.chars().any(|c| c.is_ascii_lowercase()) {
        score += 1;
    }
    if raw.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
    }
    if raw.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if raw.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        score += 1;
    }

    match score {
        0..=2 => PasswordStrength::Weak,
        3..=4 => PasswordStrength::Fair,
        5 => PasswordStrength::Good,
        6 => PasswordStrength::VeryGood,
        _ => PasswordStrength::Strong,
    }
}

/// Whether a candidate satisfies the composition policy
pub fn meets_policy(raw: &str) -> bool {
    check_policy(raw).is_ok()
}

fn check_policy(normalized: &str) -> Result<(), PasswordPolicyError> {
    if normalized.trim().is_empty() {
        return Err(PasswordPolicyError::Empty);
    }

    let char_count = normalized.chars().count();

    if char_count < MIN_PASSWORD_LENGTH {
        return Err(PasswordPolicyError::TooShort {
            min: MIN_PASSWORD_LENGTH,
            actual: char_count,
        });
    }

    if char_count > MAX_PASSWORD_LENGTH {
        return Err(PasswordPolicyError::TooLong {
            max: MAX_PASSWORD_LENGTH,
            actual: char_count,
        });
    }

    if !normalized.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordPolicyError::MissingUppercase);
    }
    if !normalized.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PasswordPolicyError::MissingLowercase);
    }
    if !normalized.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordPolicyError::MissingDigit);
    }
    if !normalized.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err(PasswordPolicyError::MissingSpecial);
    }

    Ok(())
}

// ============================================================================
// Clear Text Password (zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Does not implement `Clone`; Debug output is redacted. Unicode input is
/// NFKC-normalized before the policy runs, so visually identical inputs
/// hash identically.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password, enforcing the composition policy
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();
        check_policy(&normalized)?;
        Ok(Self(normalized))
    }

    /// Create without policy checks (verification of stored credentials
    /// must not depend on the current policy)
    pub fn new_unchecked(raw: String) -> Self {
        Self(raw.nfkc().collect())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash with Argon2id and a fresh random salt
    pub fn hash(&self) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(OsRng);

        let hash = Argon2::default()
            .hash_password(self.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (PHC string, safe to store)
// ============================================================================

/// Hashed password in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Restore from a stored PHC string
    pub fn from_phc_string(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = phc.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    /// PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a clear text password against this hash
    ///
    /// Constant-time comparison inside the hasher; returns false for any
    /// failure without distinguishing the cause.
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_accepts_valid() {
        assert!(meets_policy("Passw0rd!"));
        assert!(meets_policy("Str0ng#Password"));
    }

    #[test]
    fn test_policy_rejects_each_missing_class() {
        assert_eq!(
            ClearTextPassword::new("Short1!".to_string()).unwrap_err(),
            PasswordPolicyError::TooShort { min: 8, actual: 7 }
        );
        assert_eq!(
            ClearTextPassword::new("passw0rd!".to_string()).unwrap_err(),
            PasswordPolicyError::MissingUppercase
        );
        assert_eq!(
            ClearTextPassword::new("PASSW0RD!".to_string()).unwrap_err(),
            PasswordPolicyError::MissingLowercase
        );
        assert_eq!(
            ClearTextPassword::new("Password!".to_string()).unwrap_err(),
            PasswordPolicyError::MissingDigit
        );
        assert_eq!(
            ClearTextPassword::new("Passw0rdX".to_string()).unwrap_err(),
            PasswordPolicyError::MissingSpecial
        );
        assert_eq!(
            ClearTextPassword::new("   ".to_string()).unwrap_err(),
            PasswordPolicyError::Empty
        );
    }

    #[test]
    fn test_policy_rejects_too_long() {
        let long = format!("Aa1!{}", "x".repeat(MAX_PASSWORD_LENGTH));
        assert!(matches!(
            ClearTextPassword::new(long).unwrap_err(),
            PasswordPolicyError::TooLong { .. }
        ));
    }

    #[test]
    fn test_hash_and_verify() {
        let password = ClearTextPassword::new("Passw0rd!".to_string()).unwrap();
        let hashed = password.hash().unwrap();

        assert!(hashed.verify(&password));

        let wrong = ClearTextPassword::new("Wr0ngPass!".to_string()).unwrap();
        assert!(!hashed.verify(&wrong));
    }

    #[test]
    fn test_two_hashes_of_same_password_differ() {
        // Fresh salt per hash
        let password = ClearTextPassword::new("Passw0rd!".to_string()).unwrap();
        let a = password.hash().unwrap();
        let b = password.hash().unwrap();
        assert_ne!(a.as_phc_string(), b.as_phc_string());
        assert!(a.verify(&password));
        assert!(b.verify(&password));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let password = ClearTextPassword::new("Passw0rd!".to_string()).unwrap();
        let hashed = password.hash().unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&password));
    }

    #[test]
    fn test_invalid_phc_string_rejected() {
        assert!(HashedPassword::from_phc_string("not-a-phc-string").is_err());
    }

    #[test]
    fn test_strength_ordinals() {
        assert_eq!(password_strength(""), PasswordStrength::Weak);
        assert_eq!(password_strength("abc"), PasswordStrength::Weak);
        assert_eq!(password_strength("abcdefgh"), PasswordStrength::Weak);
        // 8 chars, three classes: length 1 + classes 3
        assert_eq!(password_strength("Abcdefg1"), PasswordStrength::Fair);
        // 10 chars, four classes: length 2 + classes 4
        assert_eq!(password_strength("Abcdefg1!x"), PasswordStrength::VeryGood);
        // 12+ chars, four classes
        assert_eq!(password_strength("Abcdefg1!xyz"), PasswordStrength::Strong);
        assert!(PasswordStrength::Weak < PasswordStrength::Strong);
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::new("Secr3tPass!".to_string()).unwrap();
        let debug = format!("{:?}", password);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("Secr3t"));

        let hashed = password.hash().unwrap();
        let debug = format!("{:?}", hashed);
        assert!(debug.contains("HASH"));
        assert!(!debug.contains("argon2id"));
    }

    #[test]
    fn test_nfkc_normalization_stable() {
        // Fullwidth and ASCII forms normalize to the same secret
        let ascii = ClearTextPassword::new("Passw0rd!A".to_string()).unwrap();
        let fullwidth = ClearTextPassword::new("Ｐassw0rd!Ａ".to_string()).unwrap();
        let hashed = ascii.hash().unwrap();
        assert!(hashed.verify(&fullwidth));
    }
}
