//! Repository for the `tasks` table.

use clientdesk_core::status::TaskStatus;
use clientdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::task::{NewTask, Task};

const COLUMNS: &str = "id, project_id, name, description, status, priority, start_date, \
     end_date, estimated_hours, actual_hours, assignee_id, created_at, updated_at, archived_at";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task under `project_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &NewTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks
                (project_id, name, description, status, priority, start_date, end_date,
                 estimated_hours, actual_hours, assignee_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.status.as_str())
            .bind(input.priority.as_str())
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.estimated_hours)
            .bind(input.actual_hours)
            .bind(input.assignee_id)
            .fetch_one(pool)
            .await
    }

    /// Find a task by ID. Excludes archived rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND archived_at IS NULL");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's tasks in creation order. Excludes archived rows.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE project_id = $1 AND archived_at IS NULL
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Replace every editable field of a task.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &NewTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                name = $2,
                description = $3,
                status = $4,
                priority = $5,
                start_date = $6,
                end_date = $7,
                estimated_hours = $8,
                actual_hours = $9,
                assignee_id = $10,
                updated_at = NOW()
             WHERE id = $1 AND archived_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.status.as_str())
            .bind(input.priority.as_str())
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.estimated_hours)
            .bind(input.actual_hours)
            .bind(input.assignee_id)
            .fetch_optional(pool)
            .await
    }

    /// Set the status of a live task.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: TaskStatus,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET status = $2, updated_at = NOW()
             WHERE id = $1 AND archived_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Archive every live task in `ids` with one statement.
    pub async fn archive_many(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tasks SET archived_at = NOW(), updated_at = NOW()
             WHERE id = ANY($1) AND archived_at IS NULL",
        )
        .bind(ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
