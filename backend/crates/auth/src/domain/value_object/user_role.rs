//! User Role Value Object
//!
//! Closed role set. The source modeled roles as free-form strings; here the
//! set is a tagged enum and every consumer matches exhaustively.
//!
//! There is deliberately no ordering and no `is_at_least` helper: the
//! authorization gate checks strict equality, so Admin is not implicitly
//! "greater than" Client for operations that require the Client role.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User role
///
/// Immutable after signup; no promotion/demotion operation exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Full visibility, user/project management, request resolution
    Admin,
    /// Restricted visibility, may request project access
    Client,
}

impl Role {
    /// Numeric ID for database storage
    #[inline]
    pub const fn id(&self) -> i16 {
        match self {
            Role::Admin => 0,
            Role::Client => 1,
        }
    }

    /// Wire/API code (case-sensitive, as the signup contract requires)
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Client => "Client",
        }
    }

    /// Parse from numeric ID
    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Role::Admin),
            1 => Some(Role::Client),
            _ => None,
        }
    }

    /// Parse from wire code; anything but the two exact spellings is rejected
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Admin" => Some(Role::Admin),
            "Client" => Some(Role::Client),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
