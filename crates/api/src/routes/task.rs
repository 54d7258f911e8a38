//! Route definitions for the `/tasks` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// POST   /archive                       -> archive
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update
/// DELETE /{id}                          -> delete
/// PATCH  /{id}/status                   -> set_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/archive", post(task::archive))
        .route(
            "/{id}",
            get(task::get_by_id).put(task::update).delete(task::delete),
        )
        .route("/{id}/status", patch(task::set_status))
}
