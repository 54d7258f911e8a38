//! Route definitions for the `/projects` resource.
//!
//! Also nests project-scoped task routes under `/projects/{id}/tasks`.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{project, task};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// POST   /archive                       -> archive
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update
/// DELETE /{id}                          -> delete
/// PATCH  /{id}/status                   -> set_status
///
/// GET    /{id}/tasks                    -> list_by_project
/// POST   /{id}/tasks                    -> create
/// ```
pub fn router() -> Router<AppState> {
    let task_routes = Router::new().route("/", get(task::list_by_project).post(task::create));

    Router::new()
        .route("/archive", post(project::archive))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/status", patch(project::set_status))
        .nest("/{id}/tasks", task_routes)
}
