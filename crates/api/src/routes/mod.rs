pub mod client;
pub mod health;
pub mod project;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /clients                                   list, create
/// /clients/export                            CSV export (GET)
/// /clients/archive                           bulk archive (POST)
/// /clients/{id}                              get, update, archive
/// /clients/{id}/status                       set status (PATCH)
/// /clients/{id}/toggle-status                flip status (POST)
/// /clients/{id}/projects                     list, create
///
/// /projects/archive                          bulk archive (POST)
/// /projects/{id}                             get (with tasks), update, archive
/// /projects/{id}/status                      set status (PATCH)
/// /projects/{id}/tasks                       list, create
///
/// /tasks/archive                             bulk archive (POST)
/// /tasks/{id}                                get, update, archive
/// /tasks/{id}/status                         set status (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Clients, their CSV export and client-scoped projects.
        .nest("/clients", client::router())
        // Projects by id, and project-scoped tasks.
        .nest("/projects", project::router())
        // Tasks by id.
        .nest("/tasks", task::router())
}
