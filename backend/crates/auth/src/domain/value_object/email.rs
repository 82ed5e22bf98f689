//! Email Value Object
//!
//! Validated, lower-cased email address. Syntax only - deliverability is
//! out of scope.
//!
//! Accepted form: ASCII local part (`A-Z a-z 0-9 . _ % + -`), `@`,
//! dot-segmented domain of alphanumeric/hyphen labels, and a final label of
//! at least two ASCII letters.

use crate::error::{AuthError, AuthResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum length of the local part
const LOCAL_PART_MAX_LENGTH: usize = 64;

/// Maximum overall length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    ///
    /// Input is trimmed and lower-cased before validation, so
    /// `"Foo@Bar.COM"` and `"foo@bar.com"` are the same email.
    pub fn new(email: impl Into<String>) -> AuthResult<Self> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() {
            return Err(AuthError::Validation("Email cannot be empty".to_string()));
        }

        if email.len() > EMAIL_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "Email must be at most {} characters",
                EMAIL_MAX_LENGTH
            )));
        }

        if !Self::is_valid_format(&email) {
            return Err(AuthError::Validation(
                "Invalid email format. Please provide a valid email address".to_string(),
            ));
        }

        Ok(Self(email))
    }

    /// Syntax check on an already lower-cased candidate
    ///
    /// Pure, no side effects; usable on raw user input for the boolean
    /// "is this an email at all" question (e.g. the login identifier probe).
    pub fn is_valid_format(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        // Local part: non-empty ASCII from the allowed set
        if local.is_empty() || local.len() > LOCAL_PART_MAX_LENGTH {
            return false;
        }
        if !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'))
        {
            return false;
        }

        // Domain: at least two dot-separated labels
        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 {
            return false;
        }

        for label in &labels {
            if label.is_empty() {
                return false;
            }
            if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return false;
            }
            if label.starts_with('-') || label.ends_with('-') {
                return false;
            }
        }

        // TLD: two or more ASCII letters
        let tld = labels[labels.len() - 1];
        tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
    }

    /// Restore from a stored value (already validated at write time)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = AuthError;

    fn from_str(s: &str) -> AuthResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("user@example.com").is_ok());
        assert!(Email::new("User@Example.COM").is_ok());
        assert!(Email::new("user.name@example.co.jp").is_ok());
        assert!(Email::new("user+tag@example.com").is_ok());
        assert!(Email::new("u_ser%x@sub-domain.example.org").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        assert!(Email::new("").is_err());
        assert!(Email::new("userexample.com").is_err());
        assert!(Email::new("user@").is_err());
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("user@@example.com").is_err());
        assert!(Email::new("user@example").is_err()); // no TLD
        assert!(Email::new("user@example.c").is_err()); // 1-letter TLD
        assert!(Email::new("user@example.c0m").is_err()); // digit in TLD
        assert!(Email::new("user@.example.com").is_err()); // empty label
        assert!(Email::new("user@-bad.example.com").is_err());
        assert!(Email::new("us er@example.com").is_err());
    }

    #[test]
    fn test_email_case_normalization() {
        let email = Email::new("User@Example.COM").unwrap();
        assert_eq!(email.as_str(), "user@example.com");
    }
}
