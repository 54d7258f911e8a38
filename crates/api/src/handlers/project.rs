//! Handlers for projects, both client-scoped and by id.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clientdesk_core::mutation::MutationResult;
use clientdesk_core::types::DbId;
use clientdesk_db::models::project::{Project, ProjectInput};
use clientdesk_db::models::task::Task;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::{ArchiveRequest, FormJson, StatusUpdate};
use crate::mutations::{self, MutationError, MutationOutcome};
use crate::response::DataResponse;
use crate::state::AppState;

/// A project with its live tasks.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub tasks: Vec<Task>,
}

/// GET /api/v1/clients/{client_id}/projects
pub async fn list_by_client(
    State(state): State<AppState>,
    Path(client_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    if state.store.find_client(client_id).await?.is_none() {
        return Err(AppError::not_found("Client", client_id));
    }
    let projects = state.store.list_projects(client_id).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/clients/{client_id}/projects
pub async fn create(
    State(state): State<AppState>,
    Path(client_id): Path<DbId>,
    FormJson(input): FormJson<ProjectInput>,
) -> MutationOutcome<(StatusCode, Json<MutationResult>)> {
    let id = mutations::create_project(state.store.as_ref(), client_id, &input).await?;
    Ok((StatusCode::CREATED, Json(MutationResult::ok(id))))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let project = state
        .store
        .find_project(id)
        .await?
        .ok_or(AppError::not_found("Project", id))?;
    let tasks = state.store.list_tasks(id).await?;
    Ok(Json(DataResponse {
        data: ProjectDetail { project, tasks },
    }))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    FormJson(input): FormJson<ProjectInput>,
) -> MutationOutcome<Json<MutationResult>> {
    let id = mutations::update_project(state.store.as_ref(), id, &input).await?;
    Ok(Json(MutationResult::ok(id)))
}

/// PATCH /api/v1/projects/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    FormJson(input): FormJson<StatusUpdate>,
) -> MutationOutcome<Json<MutationResult>> {
    let id = mutations::set_project_status(state.store.as_ref(), id, &input.status).await?;
    Ok(Json(MutationResult::ok(id)))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> MutationOutcome<Json<MutationResult>> {
    if mutations::archive_projects(state.store.as_ref(), &[id]).await? == 0 {
        return Err(MutationError::NotFound {
            entity: "Project",
            id,
        });
    }
    Ok(Json(MutationResult::ok(id)))
}

/// POST /api/v1/projects/archive
pub async fn archive(
    State(state): State<AppState>,
    FormJson(input): FormJson<ArchiveRequest>,
) -> MutationOutcome<Json<MutationResult>> {
    let count = mutations::archive_projects(state.store.as_ref(), &input.ids).await?;
    Ok(Json(MutationResult::bulk(count)))
}
