//! Repository for the `projects` table.

use clientdesk_core::status::ProjectStatus;
use clientdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{NewProject, Project};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, name, description, budget, currency, status, \
     start_date, end_date, created_at, updated_at, archived_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project under `client_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        client_id: DbId,
        input: &NewProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (client_id, name, description, budget, currency, status, start_date, end_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(client_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.budget)
            .bind(&input.currency)
            .bind(input.status.as_str())
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// Find a project by ID. Excludes archived rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND archived_at IS NULL");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a client's projects in creation order. Excludes archived rows.
    pub async fn list_by_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE client_id = $1 AND archived_at IS NULL
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// List the projects of every client in `client_ids`, in creation order.
    /// Excludes archived rows.
    pub async fn list_for_clients(
        pool: &PgPool,
        client_ids: &[DbId],
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE client_id = ANY($1) AND archived_at IS NULL
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(client_ids)
            .fetch_all(pool)
            .await
    }

    /// Replace every editable field of a project.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &NewProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = $2,
                description = $3,
                budget = $4,
                currency = $5,
                status = $6,
                start_date = $7,
                end_date = $8,
                updated_at = NOW()
             WHERE id = $1 AND archived_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.budget)
            .bind(&input.currency)
            .bind(input.status.as_str())
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_optional(pool)
            .await
    }

    /// Set the status of a live project.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: ProjectStatus,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status = $2, updated_at = NOW()
             WHERE id = $1 AND archived_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Archive every live project in `ids` with one statement.
    pub async fn archive_many(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET archived_at = NOW(), updated_at = NOW()
             WHERE id = ANY($1) AND archived_at IS NULL",
        )
        .bind(ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
