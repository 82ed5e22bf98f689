//! Authorization Gate
//!
//! Role checks for an already-authenticated identity. Authentication itself
//! (handle -> identity) is the session authority's job; see
//! `application::check_session` and the `require_identity` middleware.

use crate::domain::entity::Identity;
use crate::domain::value_object::Role;
use crate::error::{AuthError, AuthResult};

/// Require the identity to hold exactly `role`
///
/// Strict equality, no hierarchy: an Admin does not pass a check that
/// requires the Client role.
pub fn require_role(identity: &Identity, role: Role) -> AuthResult<()> {
    if identity.role == role {
        Ok(())
    } else {
        tracing::debug!(
            user_id = %identity.user_id,
            actual = %identity.role,
            required = %role,
            "Role check failed"
        );
        Err(AuthError::Forbidden)
    }
}
