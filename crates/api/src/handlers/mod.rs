pub mod client;
pub mod export;
pub mod project;
pub mod task;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use clientdesk_core::types::DbId;
use serde::Deserialize;

use crate::mutations::MutationError;

/// JSON body extractor for mutation endpoints.
///
/// Same as [`Json`], but a body that fails to parse is answered with a 400
/// [`MutationResult`](clientdesk_core::mutation::MutationResult) instead of
/// axum's plain-text rejection.
pub struct FormJson<T>(pub T);

impl<S, T> FromRequest<S> for FormJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = MutationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(FormJson(value)),
            Err(rejection) => Err(MutationError::Malformed(rejection.body_text())),
        }
    }
}

/// Body of the `PATCH .../status` endpoints.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// Body of the bulk archive endpoints.
#[derive(Debug, Deserialize)]
pub struct ArchiveRequest {
    pub ids: Vec<DbId>,
}
