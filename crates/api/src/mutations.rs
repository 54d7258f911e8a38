//! Write operations behind the mutation endpoints.
//!
//! Every operation runs the same pipeline: validate the submitted form,
//! normalize it, make one store call, and classify the outcome. Failures are
//! [`MutationError`]s, which render as a [`MutationResult`] with a matching
//! HTTP status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use clientdesk_core::mutation::MutationResult;
use clientdesk_core::normalize;
use clientdesk_core::status::{ClientStatus, ProjectStatus, TaskPriority, TaskStatus};
use clientdesk_core::types::DbId;
use clientdesk_core::validation::{
    parse_choice, validate_client, validate_project, validate_task, FieldErrors,
};
use clientdesk_db::models::client::{ClientInput, NewClient};
use clientdesk_db::models::project::{NewProject, ProjectInput};
use clientdesk_db::models::task::{NewTask, TaskInput};
use clientdesk_db::{Store, StoreError};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a mutation did not apply.
#[derive(Debug, thiserror::Error)]
pub enum MutationError {
    /// The form failed validation. Nothing reached the store.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// A uniqueness rule rejected the write.
    #[error("{message}")]
    Conflict { field: String, message: String },

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// The request body could not be read as the expected form.
    #[error("{0}")]
    Malformed(String),

    /// Any other store failure, message passed through.
    #[error("{0}")]
    Store(String),
}

pub type MutationOutcome<T> = Result<T, MutationError>;

impl MutationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MutationError::Validation(_) | MutationError::Malformed(_) => StatusCode::BAD_REQUEST,
            MutationError::Conflict { .. } => StatusCode::CONFLICT,
            MutationError::NotFound { .. } => StatusCode::NOT_FOUND,
            MutationError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        match self {
            MutationError::Validation(errors) => {
                tracing::warn!(fields = %errors, "Mutation rejected by validation");
            }
            MutationError::Malformed(reason) => {
                tracing::warn!(%reason, "Mutation body rejected");
            }
            MutationError::Conflict { field, .. } => {
                tracing::warn!(%field, "Mutation rejected by uniqueness conflict");
            }
            MutationError::NotFound { entity, id } => {
                tracing::debug!(entity, id, "Mutation target not found");
            }
            MutationError::Store(msg) => {
                tracing::error!(error = %msg, "Mutation failed in store");
            }
        }
    }
}

impl From<FieldErrors> for MutationError {
    fn from(errors: FieldErrors) -> Self {
        MutationError::Validation(errors)
    }
}

impl From<StoreError> for MutationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation { field } => MutationError::Conflict {
                message: conflict_message(&field),
                field,
            },
            other => MutationError::Store(other.to_string()),
        }
    }
}

/// User-facing message for a uniqueness conflict on `field`.
pub fn conflict_message(field: &str) -> String {
    match field {
        "email" => "A client with this email already exists".to_string(),
        "phone" => "A client with this phone number already exists".to_string(),
        other => format!("A record with this {other} already exists"),
    }
}

impl From<MutationError> for MutationResult {
    fn from(err: MutationError) -> Self {
        match err {
            MutationError::Validation(errors) => MutationResult::invalid(errors),
            MutationError::Conflict { field, message } => {
                let mut field_errors = FieldErrors::new();
                field_errors.add(&field, message.clone());
                MutationResult {
                    field_errors,
                    ..MutationResult::failed(message)
                }
            }
            other => MutationResult::failed(other.to_string()),
        }
    }
}

impl IntoResponse for MutationError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        (status, Json(MutationResult::from(self))).into_response()
    }
}

fn require_ids(ids: &[DbId]) -> MutationOutcome<()> {
    if ids.is_empty() {
        let mut errors = FieldErrors::new();
        errors.add("ids", "Select at least one record");
        return Err(errors.into());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

/// Validate and normalize a client form.
pub fn client_values(input: &ClientInput) -> MutationOutcome<NewClient> {
    let fields = input.fields();
    validate_client(&fields)?;
    Ok(NewClient {
        name: normalize::trimmed(&input.name),
        email: normalize::email(&input.email),
        phone: normalize::trimmed(&input.phone),
        website: normalize::website(input.website.as_deref()),
        status: parse_choice("status", fields.status, ClientStatus::ALL)?,
        notes: normalize::optional(input.notes.as_deref()),
    })
}

pub async fn create_client(store: &dyn Store, input: &ClientInput) -> MutationOutcome<DbId> {
    let values = client_values(input)?;
    let client = store.create_client(&values).await?;
    tracing::info!(client_id = client.id, "Client created");
    Ok(client.id)
}

pub async fn update_client(
    store: &dyn Store,
    id: DbId,
    input: &ClientInput,
) -> MutationOutcome<DbId> {
    let values = client_values(input)?;
    let client = store
        .update_client(id, &values)
        .await?
        .ok_or(MutationError::NotFound { entity: "Client", id })?;
    tracing::info!(client_id = client.id, "Client updated");
    Ok(client.id)
}

pub async fn set_client_status(store: &dyn Store, id: DbId, status: &str) -> MutationOutcome<DbId> {
    let status = parse_choice("status", status, ClientStatus::ALL)?;
    let client = store
        .set_client_status(id, status)
        .await?
        .ok_or(MutationError::NotFound { entity: "Client", id })?;
    tracing::info!(client_id = client.id, %status, "Client status set");
    Ok(client.id)
}

/// Flip a client between `active` and `non_active`. Returns the new status.
pub async fn toggle_client_status(store: &dyn Store, id: DbId) -> MutationOutcome<ClientStatus> {
    let current = store
        .find_client(id)
        .await?
        .ok_or(MutationError::NotFound { entity: "Client", id })?;
    let client = store
        .set_client_status(id, current.status.toggled())
        .await?
        .ok_or(MutationError::NotFound { entity: "Client", id })?;
    tracing::info!(client_id = client.id, status = %client.status, "Client status toggled");
    Ok(client.status)
}

/// Archive every client in `ids` with one batched write.
pub async fn archive_clients(store: &dyn Store, ids: &[DbId]) -> MutationOutcome<u64> {
    require_ids(ids)?;
    let count = store.archive_clients(ids).await?;
    tracing::info!(requested = ids.len(), archived = count, "Clients archived");
    Ok(count)
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

pub fn project_values(input: &ProjectInput) -> MutationOutcome<NewProject> {
    let fields = input.fields();
    validate_project(&fields)?;
    Ok(NewProject {
        name: normalize::trimmed(&input.name),
        description: normalize::optional(input.description.as_deref()),
        budget: input.budget,
        currency: normalize::currency(&input.currency),
        status: parse_choice("status", fields.status, ProjectStatus::ALL)?,
        start_date: input.start_date,
        end_date: input.end_date,
    })
}

pub async fn create_project(
    store: &dyn Store,
    client_id: DbId,
    input: &ProjectInput,
) -> MutationOutcome<DbId> {
    let values = project_values(input)?;
    if store.find_client(client_id).await?.is_none() {
        return Err(MutationError::NotFound {
            entity: "Client",
            id: client_id,
        });
    }
    let project = store.create_project(client_id, &values).await?;
    tracing::info!(client_id, project_id = project.id, "Project created");
    Ok(project.id)
}

pub async fn update_project(
    store: &dyn Store,
    id: DbId,
    input: &ProjectInput,
) -> MutationOutcome<DbId> {
    let values = project_values(input)?;
    let project = store
        .update_project(id, &values)
        .await?
        .ok_or(MutationError::NotFound { entity: "Project", id })?;
    tracing::info!(project_id = project.id, "Project updated");
    Ok(project.id)
}

pub async fn set_project_status(
    store: &dyn Store,
    id: DbId,
    status: &str,
) -> MutationOutcome<DbId> {
    let status = parse_choice("status", status, ProjectStatus::ALL)?;
    let project = store
        .set_project_status(id, status)
        .await?
        .ok_or(MutationError::NotFound { entity: "Project", id })?;
    tracing::info!(project_id = project.id, %status, "Project status set");
    Ok(project.id)
}

pub async fn archive_projects(store: &dyn Store, ids: &[DbId]) -> MutationOutcome<u64> {
    require_ids(ids)?;
    let count = store.archive_projects(ids).await?;
    tracing::info!(requested = ids.len(), archived = count, "Projects archived");
    Ok(count)
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

pub fn task_values(input: &TaskInput) -> MutationOutcome<NewTask> {
    let fields = input.fields();
    validate_task(&fields)?;
    Ok(NewTask {
        name: normalize::trimmed(&input.name),
        description: normalize::optional(input.description.as_deref()),
        status: parse_choice("status", fields.status, TaskStatus::ALL)?,
        priority: parse_choice("priority", fields.priority, TaskPriority::ALL)?,
        start_date: input.start_date,
        end_date: input.end_date,
        estimated_hours: input.estimated_hours,
        actual_hours: input.actual_hours,
        assignee_id: input.assignee_id,
    })
}

pub async fn create_task(
    store: &dyn Store,
    project_id: DbId,
    input: &TaskInput,
) -> MutationOutcome<DbId> {
    let values = task_values(input)?;
    if store.find_project(project_id).await?.is_none() {
        return Err(MutationError::NotFound {
            entity: "Project",
            id: project_id,
        });
    }
    let task = store.create_task(project_id, &values).await?;
    tracing::info!(project_id, task_id = task.id, "Task created");
    Ok(task.id)
}

pub async fn update_task(store: &dyn Store, id: DbId, input: &TaskInput) -> MutationOutcome<DbId> {
    let values = task_values(input)?;
    let task = store
        .update_task(id, &values)
        .await?
        .ok_or(MutationError::NotFound { entity: "Task", id })?;
    tracing::info!(task_id = task.id, "Task updated");
    Ok(task.id)
}

pub async fn set_task_status(store: &dyn Store, id: DbId, status: &str) -> MutationOutcome<DbId> {
    let status = parse_choice("status", status, TaskStatus::ALL)?;
    let task = store
        .set_task_status(id, status)
        .await?
        .ok_or(MutationError::NotFound { entity: "Task", id })?;
    tracing::info!(task_id = task.id, %status, "Task status set");
    Ok(task.id)
}

pub async fn archive_tasks(store: &dyn Store, ids: &[DbId]) -> MutationOutcome<u64> {
    require_ids(ids)?;
    let count = store.archive_tasks(ids).await?;
    tracing::info!(requested = ids.len(), archived = count, "Tasks archived");
    Ok(count)
}
