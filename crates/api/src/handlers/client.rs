//! Handlers for the `/clients` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use clientdesk_core::mutation::MutationResult;
use clientdesk_core::table::{self, TablePage};
use clientdesk_core::types::DbId;
use clientdesk_db::models::client::{ClientInput, ClientWithStats};
use clientdesk_db::models::project::Project;
use clientdesk_db::overview;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::{ArchiveRequest, FormJson, StatusUpdate};
use crate::mutations::{self, MutationError, MutationOutcome};
use crate::query::ClientListQuery;
use crate::response::DataResponse;
use crate::state::AppState;

/// A client with its statistics and live projects.
#[derive(Debug, Serialize)]
pub struct ClientDetail {
    #[serde(flatten)]
    pub client: ClientWithStats,
    pub projects: Vec<Project>,
}

/// GET /api/v1/clients
///
/// Filtered, sorted and paginated list of clients with project statistics.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ClientListQuery>,
) -> AppResult<Json<DataResponse<TablePage<ClientWithStats>>>> {
    let params = query.into_params(state.config.default_page_size);
    let rows = overview::clients_with_stats(state.store.as_ref()).await?;
    let page = table::apply(&rows, &params);

    let data = TablePage {
        rows: page.rows.into_iter().cloned().collect(),
        page: page.page,
        page_size: page.page_size,
        total_matches: page.total_matches,
        total_pages: page.total_pages,
    };
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/clients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ClientDetail>>> {
    let (client, projects) = overview::client_detail(state.store.as_ref(), id)
        .await?
        .ok_or(AppError::not_found("Client", id))?;
    Ok(Json(DataResponse {
        data: ClientDetail { client, projects },
    }))
}

/// POST /api/v1/clients
pub async fn create(
    State(state): State<AppState>,
    FormJson(input): FormJson<ClientInput>,
) -> MutationOutcome<(StatusCode, Json<MutationResult>)> {
    let id = mutations::create_client(state.store.as_ref(), &input).await?;
    Ok((StatusCode::CREATED, Json(MutationResult::ok(id))))
}

/// PUT /api/v1/clients/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    FormJson(input): FormJson<ClientInput>,
) -> MutationOutcome<Json<MutationResult>> {
    let id = mutations::update_client(state.store.as_ref(), id, &input).await?;
    Ok(Json(MutationResult::ok(id)))
}

/// PATCH /api/v1/clients/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    FormJson(input): FormJson<StatusUpdate>,
) -> MutationOutcome<Json<MutationResult>> {
    let id = mutations::set_client_status(state.store.as_ref(), id, &input.status).await?;
    Ok(Json(MutationResult::ok(id)))
}

/// POST /api/v1/clients/{id}/toggle-status
pub async fn toggle_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> MutationOutcome<Json<MutationResult>> {
    mutations::toggle_client_status(state.store.as_ref(), id).await?;
    Ok(Json(MutationResult::ok(id)))
}

/// DELETE /api/v1/clients/{id}
///
/// Archives the client. Its projects stay in place.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> MutationOutcome<Json<MutationResult>> {
    let archived = mutations::archive_clients(state.store.as_ref(), &[id]).await?;
    if archived == 0 {
        return Err(MutationError::NotFound {
            entity: "Client",
            id,
        });
    }
    Ok(Json(MutationResult::ok(id)))
}

/// POST /api/v1/clients/archive
pub async fn archive(
    State(state): State<AppState>,
    FormJson(input): FormJson<ArchiveRequest>,
) -> MutationOutcome<Json<MutationResult>> {
    let count = mutations::archive_clients(state.store.as_ref(), &input.ids).await?;
    Ok(Json(MutationResult::bulk(count)))
}
