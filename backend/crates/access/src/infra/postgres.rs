//! PostgreSQL Repository Implementations (projects + access requests)

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{AccessRequest, Project, RequestStatus};
use crate::domain::repository::{AccessRequestRepository, ProjectRepository};
use crate::error::{AccessError, AccessResult};
use kernel::id::{ProjectId, RequestId, UserId};

/// PostgreSQL-backed repository for projects and access requests
#[derive(Clone)]
pub struct PgAccessRepository {
    pool: PgPool,
}

impl PgAccessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Project Repository Implementation
// ============================================================================

const PROJECT_COLUMNS: &str = r#"
    project_id,
    project_name,
    description,
    created_by,
    accessible_by,
    created_at
"#;

impl ProjectRepository for PgAccessRepository {
    async fn create(&self, project: &Project) -> AccessResult<()> {
        let accessible_by: Vec<Uuid> = project
            .accessible_by
            .iter()
            .map(|id| *id.as_uuid())
            .collect();

        sqlx::query(
            r#"
            INSERT INTO projects (
                project_id,
                project_name,
                description,
                created_by,
                accessible_by,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(project.id.as_uuid())
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.created_by.as_uuid())
        .bind(&accessible_by)
        .bind(project.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, project_id: &ProjectId) -> AccessResult<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE project_id = $1"
        ))
        .bind(project_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProjectRow::into_project))
    }

    async fn list_all(&self) -> AccessResult<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProjectRow::into_project).collect())
    }

    async fn list_accessible_to(&self, user_id: &UserId) -> AccessResult<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            SELECT {PROJECT_COLUMNS} FROM projects
            WHERE accessible_by @> ARRAY[$1::uuid]
            ORDER BY created_at
            "#
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProjectRow::into_project).collect())
    }

    async fn grant_access(&self, project_id: &ProjectId, user_id: &UserId) -> AccessResult<()> {
        // Single atomic read-modify-write; appends only if absent
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET accessible_by = accessible_by || $2::uuid
            WHERE project_id = $1
              AND NOT (accessible_by @> ARRAY[$2::uuid])
            "#,
        )
        .bind(project_id.as_uuid())
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(
                project_id = %project_id,
                user_id = %user_id,
                "Grant skipped (already present or project gone)"
            );
        }

        Ok(())
    }
}

// ============================================================================
// Access Request Repository Implementation
// ============================================================================

const REQUEST_COLUMNS: &str = r#"
    request_id,
    user_id,
    user_name,
    user_email,
    project_id,
    project_name,
    status,
    requested_at,
    resolved_at,
    resolved_by
"#;

impl AccessRequestRepository for PgAccessRepository {
    async fn create(&self, request: &AccessRequest) -> AccessResult<()> {
        sqlx::query(
            r#"
            INSERT INTO access_requests (
                request_id,
                user_id,
                user_name,
                user_email,
                project_id,
                project_name,
                status,
                requested_at,
                resolved_at,
                resolved_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(request.id.as_uuid())
        .bind(request.user_id.as_uuid())
        .bind(&request.user_name)
        .bind(&request.user_email)
        .bind(request.project_id.as_uuid())
        .bind(&request.project_name)
        .bind(request.status.id())
        .bind(request.requested_at)
        .bind(request.resolved_at)
        .bind(request.resolved_by.map(|id| id.into_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // Partial unique index on pending (user, project) pairs is the
            // backstop behind the has_pending pre-check
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23505") {
                    return AccessError::DuplicatePending;
                }
            }
            AccessError::Database(e)
        })?;

        Ok(())
    }

    async fn find_by_id(&self, request_id: &RequestId) -> AccessResult<Option<AccessRequest>> {
        let row = sqlx::query_as::<_, AccessRequestRow>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM access_requests WHERE request_id = $1"
        ))
        .bind(request_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AccessRequestRow::into_request).transpose()
    }

    async fn has_pending(&self, user_id: &UserId, project_id: &ProjectId) -> AccessResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM access_requests
                WHERE user_id = $1 AND project_id = $2 AND status = $3
            )
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(project_id.as_uuid())
        .bind(RequestStatus::Pending.id())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn pending_project_ids(&self, user_id: &UserId) -> AccessResult<Vec<ProjectId>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT project_id FROM access_requests WHERE user_id = $1 AND status = $2",
        )
        .bind(user_id.as_uuid())
        .bind(RequestStatus::Pending.id())
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().map(ProjectId::from_uuid).collect())
    }

    async fn list_all(&self) -> AccessResult<Vec<AccessRequest>> {
        let rows = sqlx::query_as::<_, AccessRequestRow>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM access_requests ORDER BY requested_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AccessRequestRow::into_request).collect()
    }

    async fn update(&self, request: &AccessRequest) -> AccessResult<()> {
        sqlx::query(
            r#"
            UPDATE access_requests
            SET status = $2, resolved_at = $3, resolved_by = $4
            WHERE request_id = $1
            "#,
        )
        .bind(request.id.as_uuid())
        .bind(request.status.id())
        .bind(request.resolved_at)
        .bind(request.resolved_by.map(|id| id.into_uuid()))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Row mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProjectRow {
    project_id: Uuid,
    project_name: String,
    description: String,
    created_by: Uuid,
    accessible_by: Vec<Uuid>,
    created_at: DateTime<Utc>,
}

impl ProjectRow {
    fn into_project(self) -> Project {
        Project {
            id: ProjectId::from_uuid(self.project_id),
            name: self.project_name,
            description: self.description,
            created_by: UserId::from_uuid(self.created_by),
            accessible_by: self
                .accessible_by
                .into_iter()
                .map(UserId::from_uuid)
                .collect(),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AccessRequestRow {
    request_id: Uuid,
    user_id: Uuid,
    user_name: String,
    user_email: String,
    project_id: Uuid,
    project_name: String,
    status: i16,
    requested_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
    resolved_by: Option<Uuid>,
}

impl AccessRequestRow {
    fn into_request(self) -> AccessResult<AccessRequest> {
        let status = RequestStatus::from_id(self.status)
            .ok_or_else(|| AccessError::Internal(format!("Invalid status id: {}", self.status)))?;

        Ok(AccessRequest {
            id: RequestId::from_uuid(self.request_id),
            user_id: UserId::from_uuid(self.user_id),
            user_name: self.user_name,
            user_email: self.user_email,
            project_id: ProjectId::from_uuid(self.project_id),
            project_name: self.project_name,
            status,
            requested_at: self.requested_at,
            resolved_at: self.resolved_at,
            resolved_by: self.resolved_by.map(UserId::from_uuid),
        })
    }
}
