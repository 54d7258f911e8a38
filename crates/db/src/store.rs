//! The injectable data-access seam.
//!
//! Handlers and mutation operations depend on `Arc<dyn Store>` rather than on
//! a pool, so the same code runs against PostgreSQL in production and an
//! in-memory fake in tests. Every read excludes archived rows.

use async_trait::async_trait;
use clientdesk_core::status::{ClientStatus, ProjectStatus, TaskStatus};
use clientdesk_core::types::DbId;

use crate::models::client::{Client, NewClient};
use crate::models::project::{NewProject, Project};
use crate::models::task::{NewTask, Task};
use crate::repositories::{ClientRepo, ProjectRepo, TaskRepo};
use crate::DbPool;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Errors surfaced by a [`Store`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A write collided with a unique index. `field` names the column.
    #[error("Duplicate value for {field}")]
    UniqueViolation { field: String },

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// The backing store could not serve the request.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                let field = db_err
                    .constraint()
                    .map(field_for_constraint)
                    .unwrap_or("unknown");
                return StoreError::UniqueViolation {
                    field: field.to_string(),
                };
            }
        }
        StoreError::Database(err)
    }
}

/// Map a unique index name to the column it guards.
///
/// Index names follow `uq_<table>_<column>`.
pub fn field_for_constraint(constraint: &str) -> &str {
    match constraint {
        "uq_clients_email" => "email",
        "uq_clients_phone" => "phone",
        other => other
            .strip_prefix("uq_")
            .and_then(|rest| rest.split_once('_'))
            .map_or(other, |(_, column)| column),
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read/write operations over clients, projects and tasks.
#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap round-trip used by the health endpoint.
    async fn health_check(&self) -> StoreResult<()>;

    // -- clients --

    async fn list_clients(&self) -> StoreResult<Vec<Client>>;
    async fn find_client(&self, id: DbId) -> StoreResult<Option<Client>>;
    async fn create_client(&self, input: &NewClient) -> StoreResult<Client>;
    async fn update_client(&self, id: DbId, input: &NewClient) -> StoreResult<Option<Client>>;
    async fn set_client_status(
        &self,
        id: DbId,
        status: ClientStatus,
    ) -> StoreResult<Option<Client>>;
    /// Archive all of `ids` in one batch. Returns the number archived.
    async fn archive_clients(&self, ids: &[DbId]) -> StoreResult<u64>;

    // -- projects --

    async fn list_projects(&self, client_id: DbId) -> StoreResult<Vec<Project>>;
    async fn list_projects_for_clients(&self, client_ids: &[DbId]) -> StoreResult<Vec<Project>>;
    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>>;
    async fn create_project(&self, client_id: DbId, input: &NewProject) -> StoreResult<Project>;
    async fn update_project(&self, id: DbId, input: &NewProject)
        -> StoreResult<Option<Project>>;
    async fn set_project_status(
        &self,
        id: DbId,
        status: ProjectStatus,
    ) -> StoreResult<Option<Project>>;
    async fn archive_projects(&self, ids: &[DbId]) -> StoreResult<u64>;

    // -- tasks --

    async fn list_tasks(&self, project_id: DbId) -> StoreResult<Vec<Task>>;
    async fn find_task(&self, id: DbId) -> StoreResult<Option<Task>>;
    async fn create_task(&self, project_id: DbId, input: &NewTask) -> StoreResult<Task>;
    async fn update_task(&self, id: DbId, input: &NewTask) -> StoreResult<Option<Task>>;
    async fn set_task_status(&self, id: DbId, status: TaskStatus) -> StoreResult<Option<Task>>;
    async fn archive_tasks(&self, ids: &[DbId]) -> StoreResult<u64>;
}

/// [`Store`] backed by a PostgreSQL pool, delegating to the repositories.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }

    async fn list_clients(&self) -> StoreResult<Vec<Client>> {
        Ok(ClientRepo::list(&self.pool).await?)
    }

    async fn find_client(&self, id: DbId) -> StoreResult<Option<Client>> {
        Ok(ClientRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_client(&self, input: &NewClient) -> StoreResult<Client> {
        Ok(ClientRepo::create(&self.pool, input).await?)
    }

    async fn update_client(&self, id: DbId, input: &NewClient) -> StoreResult<Option<Client>> {
        Ok(ClientRepo::update(&self.pool, id, input).await?)
    }

    async fn set_client_status(
        &self,
        id: DbId,
        status: ClientStatus,
    ) -> StoreResult<Option<Client>> {
        Ok(ClientRepo::set_status(&self.pool, id, status).await?)
    }

    async fn archive_clients(&self, ids: &[DbId]) -> StoreResult<u64> {
        Ok(ClientRepo::archive_many(&self.pool, ids).await?)
    }

    async fn list_projects(&self, client_id: DbId) -> StoreResult<Vec<Project>> {
        Ok(ProjectRepo::list_by_client(&self.pool, client_id).await?)
    }

    async fn list_projects_for_clients(&self, client_ids: &[DbId]) -> StoreResult<Vec<Project>> {
        Ok(ProjectRepo::list_for_clients(&self.pool, client_ids).await?)
    }

    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>> {
        Ok(ProjectRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_project(&self, client_id: DbId, input: &NewProject) -> StoreResult<Project> {
        Ok(ProjectRepo::create(&self.pool, client_id, input).await?)
    }

    async fn update_project(
        &self,
        id: DbId,
        input: &NewProject,
    ) -> StoreResult<Option<Project>> {
        Ok(ProjectRepo::update(&self.pool, id, input).await?)
    }

    async fn set_project_status(
        &self,
        id: DbId,
        status: ProjectStatus,
    ) -> StoreResult<Option<Project>> {
        Ok(ProjectRepo::set_status(&self.pool, id, status).await?)
    }

    async fn archive_projects(&self, ids: &[DbId]) -> StoreResult<u64> {
        Ok(ProjectRepo::archive_many(&self.pool, ids).await?)
    }

    async fn list_tasks(&self, project_id: DbId) -> StoreResult<Vec<Task>> {
        Ok(TaskRepo::list_by_project(&self.pool, project_id).await?)
    }

    async fn find_task(&self, id: DbId) -> StoreResult<Option<Task>> {
        Ok(TaskRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_task(&self, project_id: DbId, input: &NewTask) -> StoreResult<Task> {
        Ok(TaskRepo::create(&self.pool, project_id, input).await?)
    }

    async fn update_task(&self, id: DbId, input: &NewTask) -> StoreResult<Option<Task>> {
        Ok(TaskRepo::update(&self.pool, id, input).await?)
    }

    async fn set_task_status(&self, id: DbId, status: TaskStatus) -> StoreResult<Option<Task>> {
        Ok(TaskRepo::set_status(&self.pool, id, status).await?)
    }

    async fn archive_tasks(&self, ids: &[DbId]) -> StoreResult<u64> {
        Ok(TaskRepo::archive_many(&self.pool, ids).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_indexes_map_to_columns() {
        assert_eq!(field_for_constraint("uq_clients_email"), "email");
        assert_eq!(field_for_constraint("uq_clients_phone"), "phone");
    }

    #[test]
    fn other_indexes_fall_back_to_suffix() {
        assert_eq!(field_for_constraint("uq_projects_name"), "name");
        assert_eq!(field_for_constraint("pk_clients"), "pk_clients");
    }

    #[test]
    fn non_database_errors_are_not_conflicts() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(_)));
    }
}
