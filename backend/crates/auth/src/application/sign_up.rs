//! Sign Up Use Case
//!
//! Creates a new user account: validate, uniqueness-check, hash, persist.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entity::{Identity, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, RawPassword, Role, UserName, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Must be exactly "Admin" or "Client"
    pub role: String,
}

/// Sign up output (the hash never leaves the use case)
#[derive(Debug)]
pub struct SignUpOutput {
    pub identity: Identity,
    pub created_at: DateTime<Utc>,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        // All fields are required
        if input.username.trim().is_empty()
            || input.email.trim().is_empty()
            || input.password.is_empty()
            || input.role.trim().is_empty()
        {
            return Err(AuthError::Validation(
                "All fields are required: username, password, email, and role".to_string(),
            ));
        }

        let username = UserName::new(&input.username)?;
        let email = Email::new(&input.email)?;
        let raw_password = RawPassword::new(input.password)?;

        let role = Role::from_code(&input.role).ok_or_else(|| {
            AuthError::Validation(
                "Invalid role. Must be either \"Admin\" or \"Client\"".to_string(),
            )
        })?;

        // Fast-path duplicate checks; two independent lookups, either match
        // rejects. The unique indexes behind `create` are the backstop for
        // concurrent signups that race past these.
        if self.user_repo.exists_by_username(&username).await? {
            return Err(AuthError::DuplicateUser);
        }
        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::DuplicateUser);
        }

        let password_hash = UserPassword::from_raw(&raw_password)?;
        let user = User::new(username, email, password_hash, role);

        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            role = %user.role,
            "User signed up"
        );

        Ok(SignUpOutput {
            identity: user.identity(),
            created_at: user.created_at,
        })
    }
}
