//! Domain Entities
//!
//! Projects and the access requests that gate client visibility into them.

use auth::Identity;
use chrono::{DateTime, Utc};
use kernel::id::{ProjectId, RequestId, UserId};

// ============================================================================
// Project
// ============================================================================

/// Project entity
///
/// `accessible_by` holds only explicitly granted client ids - set semantics,
/// no duplicates. Admins see every project through the listing rule, never
/// through an ACL entry.
#[derive(Debug, Clone)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    /// Admin who created the project
    pub created_by: UserId,
    /// Granted client ids (no duplicates)
    pub accessible_by: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Create a new project with an empty access list
    pub fn new(name: String, description: String, created_by: UserId) -> Self {
        Self {
            id: ProjectId::new(),
            name,
            description,
            created_by,
            accessible_by: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Whether a user id appears in the access list
    pub fn is_accessible_to(&self, user_id: &UserId) -> bool {
        self.accessible_by.contains(user_id)
    }

    /// Add a user id to the access list; set-union, repeats are no-ops
    pub fn grant_access(&mut self, user_id: UserId) {
        if !self.accessible_by.contains(&user_id) {
            self.accessible_by.push(user_id);
        }
    }
}

// ============================================================================
// Access Request
// ============================================================================

/// Access request status
///
/// `Pending` is the only non-terminal state; a resolved request never goes
/// back to pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Approved,
    Denied,
}

impl RequestStatus {
    /// Numeric ID for database storage
    #[inline]
    pub const fn id(&self) -> i16 {
        match self {
            RequestStatus::Pending => 0,
            RequestStatus::Approved => 1,
            RequestStatus::Denied => 2,
        }
    }

    /// Wire/API code
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Denied => "denied",
        }
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(RequestStatus::Pending),
            1 => Some(RequestStatus::Approved),
            2 => Some(RequestStatus::Denied),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Access request entity
///
/// Requester and project names are denormalized at creation time for the
/// admin listing, so they reflect the state when the request was made.
#[derive(Debug, Clone)]
pub struct AccessRequest {
    pub id: RequestId,
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
    pub project_id: ProjectId,
    pub project_name: String,
    pub status: RequestStatus,
    pub requested_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolved_by: Option<UserId>,
}

impl AccessRequest {
    /// Create a new pending request
    pub fn new(requester: &Identity, project: &Project) -> Self {
        Self {
            id: RequestId::new(),
            user_id: requester.user_id,
            user_name: requester.username.to_string(),
            user_email: requester.email.to_string(),
            project_id: project.id,
            project_name: project.name.clone(),
            status: RequestStatus::Pending,
            requested_at: Utc::now(),
            resolved_at: None,
            resolved_by: None,
        }
    }

    /// Mark approved. Re-applies the resolution fields on an
    /// already-resolved request; the ACL side stays safe because the grant
    /// is a set-union.
    pub fn approve(&mut self, admin_id: UserId) {
        self.status = RequestStatus::Approved;
        self.resolved_at = Some(Utc::now());
        self.resolved_by = Some(admin_id);
    }

    /// Mark denied. No ACL mutation ever accompanies a denial.
    pub fn deny(&mut self, admin_id: UserId) {
        self.status = RequestStatus::Denied;
        self.resolved_at = Some(Utc::now());
        self.resolved_by = Some(admin_id);
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::Role;
    use auth::domain::value_object::{Email, UserName};

    fn client_identity() -> Identity {
        Identity {
            user_id: UserId::new(),
            username: UserName::new("carol").unwrap(),
            email: Email::new("carol@example.com").unwrap(),
            role: Role::Client,
        }
    }

    #[test]
    fn test_grant_access_is_a_set_union() {
        let mut project = Project::new("P".into(), "desc".into(), UserId::new());
        let user = UserId::new();

        project.grant_access(user);
        project.grant_access(user);
        project.grant_access(user);

        assert_eq!(
            project.accessible_by.iter().filter(|&&u| u == user).count(),
            1
        );
        assert!(project.is_accessible_to(&user));
    }

    #[test]
    fn test_new_request_is_pending_with_denormalized_names() {
        let requester = client_identity();
        let project = Project::new("Apollo".into(), "desc".into(), UserId::new());
        let request = AccessRequest::new(&requester, &project);

        assert!(request.is_pending());
        assert_eq!(request.user_name, "carol");
        assert_eq!(request.user_email, "carol@example.com");
        assert_eq!(request.project_name, "Apollo");
        assert!(request.resolved_at.is_none());
        assert!(request.resolved_by.is_none());
    }

    #[test]
    fn test_resolution_is_terminal() {
        let requester = client_identity();
        let project = Project::new("P".into(), "d".into(), UserId::new());
        let admin = UserId::new();

        let mut approved = AccessRequest::new(&requester, &project);
        approved.approve(admin);
        assert_eq!(approved.status, RequestStatus::Approved);
        assert!(approved.status.is_terminal());
        assert_eq!(approved.resolved_by, Some(admin));

        let mut denied = AccessRequest::new(&requester, &project);
        denied.deny(admin);
        assert_eq!(denied.status, RequestStatus::Denied);
        assert!(denied.status.is_terminal());
    }

    #[test]
    fn test_status_id_roundtrip() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Denied,
        ] {
            assert_eq!(RequestStatus::from_id(status.id()), Some(status));
        }
        assert_eq!(RequestStatus::from_id(9), None);
    }
}
