//! Route definitions for the `/clients` resource.
//!
//! Also nests client-scoped project routes under `/clients/{id}/projects`.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{client, export, project};
use crate::state::AppState;

/// Routes mounted at `/clients`.
///
/// ```text
/// GET    /                              -> list
/// POST   /                              -> create
/// GET    /export                        -> export_clients
/// POST   /archive                       -> archive
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update
/// DELETE /{id}                          -> delete
/// PATCH  /{id}/status                   -> set_status
/// POST   /{id}/toggle-status            -> toggle_status
///
/// GET    /{id}/projects                 -> list_by_client
/// POST   /{id}/projects                 -> create
/// ```
pub fn router() -> Router<AppState> {
    let project_routes =
        Router::new().route("/", get(project::list_by_client).post(project::create));

    Router::new()
        .route("/", get(client::list).post(client::create))
        .route("/export", get(export::export_clients))
        .route("/archive", post(client::archive))
        .route(
            "/{id}",
            get(client::get_by_id)
                .put(client::update)
                .delete(client::delete),
        )
        .route("/{id}/status", patch(client::set_status))
        .route("/{id}/toggle-status", post(client::toggle_status))
        .nest("/{id}/projects", project_routes)
}
