//! API DTOs (Data Transfer Objects)
//!
//! The wire shapes. Success bodies carry `success`/`message`; the password
//! hash has no representation here at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::SignUpOutput;
use crate::domain::entity::{Identity, User};

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request (also used by the admin create-user surface)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// "Admin" or "Client"
    pub role: String,
}

/// Sign up response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub success: bool,
    pub message: String,
    pub user: CreatedUserDto,
}

/// Newly created user (no hash)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUserDto {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<&SignUpOutput> for CreatedUserDto {
    fn from(output: &SignUpOutput) -> Self {
        Self {
            id: output.identity.user_id.to_string(),
            username: output.identity.username.to_string(),
            email: output.identity.email.to_string(),
            role: output.identity.role.code().to_string(),
            created_at: output.created_at,
        }
    }
}

// ============================================================================
// Login / Logout / Me
// ============================================================================

/// Login request (`username` accepts a username or an email)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: IdentityDto,
}

/// Logout response (always success)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

/// "Who am I" response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub success: bool,
    pub user: IdentityDto,
}

/// Identity view (session snapshot)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityDto {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
}

impl From<&Identity> for IdentityDto {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.user_id.to_string(),
            username: identity.username.to_string(),
            email: identity.email.to_string(),
            role: identity.role.code().to_string(),
        }
    }
}

// ============================================================================
// Admin user listing
// ============================================================================

/// User summary for the admin surface
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryDto {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserSummaryDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.to_string(),
            email: user.email.to_string(),
            role: user.role.code().to_string(),
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// Admin user listing response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersResponse {
    pub success: bool,
    pub users: Vec<UserSummaryDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{Email, Role, UserName};
    use kernel::id::UserId;

    #[test]
    fn test_identity_dto_has_no_secret_fields() {
        let identity = Identity {
            user_id: UserId::new(),
            username: UserName::new("alice").unwrap(),
            email: Email::new("alice@example.com").unwrap(),
            role: Role::Client,
        };

        let json = serde_json::to_value(IdentityDto::from(&identity)).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("username"));
        assert!(!obj.contains_key("password"));
        assert!(!obj.contains_key("passwordHash"));
        assert_eq!(obj["role"], "Client");
    }
}
