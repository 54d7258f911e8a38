//! Shared response envelope types for API handlers.
//!
//! Read endpoints answer with a `{ "data": ... }` envelope. Mutations answer
//! with a bare [`MutationResult`](clientdesk_core::mutation::MutationResult).

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
