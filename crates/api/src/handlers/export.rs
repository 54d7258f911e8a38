//! CSV download of the client list.

use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use clientdesk_core::export::{clients_csv_string, export_filename};
use clientdesk_core::table;
use clientdesk_db::overview;

use crate::error::{AppError, AppResult};
use crate::query::ClientListQuery;
use crate::state::AppState;

/// GET /api/v1/clients/export
///
/// Exports every client matching the list filters and sort, ignoring
/// pagination.
pub async fn export_clients(
    State(state): State<AppState>,
    Query(query): Query<ClientListQuery>,
) -> AppResult<impl IntoResponse> {
    let params = query.into_params(state.config.default_page_size);
    let rows = overview::clients_with_stats(state.store.as_ref()).await?;
    let matching = table::filter_and_sort(&rows, &params);

    let csv = clients_csv_string(matching.iter().map(|row| row.export_row()))
        .map_err(|e| AppError::InternalError(format!("CSV export failed: {e}")))?;

    let filename = export_filename(Utc::now().date_naive());
    tracing::info!(rows = matching.len(), %filename, "Client export generated");

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    ))
}
