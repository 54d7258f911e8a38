//! Handlers for tasks, both project-scoped and by id.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clientdesk_core::mutation::MutationResult;
use clientdesk_core::types::DbId;
use clientdesk_db::models::task::{Task, TaskInput};

use crate::error::{AppError, AppResult};
use crate::handlers::{ArchiveRequest, FormJson, StatusUpdate};
use crate::mutations::{self, MutationError, MutationOutcome};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{project_id}/tasks
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Task>>>> {
    if state.store.find_project(project_id).await?.is_none() {
        return Err(AppError::not_found("Project", project_id));
    }
    let tasks = state.store.list_tasks(project_id).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// POST /api/v1/projects/{project_id}/tasks
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    FormJson(input): FormJson<TaskInput>,
) -> MutationOutcome<(StatusCode, Json<MutationResult>)> {
    let id = mutations::create_task(state.store.as_ref(), project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(MutationResult::ok(id))))
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Task>>> {
    let task = state
        .store
        .find_task(id)
        .await?
        .ok_or(AppError::not_found("Task", id))?;
    Ok(Json(DataResponse { data: task }))
}

/// PUT /api/v1/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    FormJson(input): FormJson<TaskInput>,
) -> MutationOutcome<Json<MutationResult>> {
    let id = mutations::update_task(state.store.as_ref(), id, &input).await?;
    Ok(Json(MutationResult::ok(id)))
}

/// PATCH /api/v1/tasks/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    FormJson(input): FormJson<StatusUpdate>,
) -> MutationOutcome<Json<MutationResult>> {
    let id = mutations::set_task_status(state.store.as_ref(), id, &input.status).await?;
    Ok(Json(MutationResult::ok(id)))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> MutationOutcome<Json<MutationResult>> {
    if mutations::archive_tasks(state.store.as_ref(), &[id]).await? == 0 {
        return Err(MutationError::NotFound { entity: "Task", id });
    }
    Ok(Json(MutationResult::ok(id)))
}

/// POST /api/v1/tasks/archive
pub async fn archive(
    State(state): State<AppState>,
    FormJson(input): FormJson<ArchiveRequest>,
) -> MutationOutcome<Json<MutationResult>> {
    let count = mutations::archive_tasks(state.store.as_ref(), &input.ids).await?;
    Ok(Json(MutationResult::bulk(count)))
}
