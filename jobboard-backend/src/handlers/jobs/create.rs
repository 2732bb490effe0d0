use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Extension, Json};
use axum::http::{HeaderMap, StatusCode};
use jobboard_core::Listing;

use crate::handlers::utils::json_body;
use crate::service::CreateJob;
use crate::{error::ApiError, state::AppState};

/// POST /jobs
///
/// Responds 201 with the created listing. When the store is unreachable the
/// listing is not persisted and carries a `mock-` id.
pub async fn create(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Listing>), ApiError> {
    let input = CreateJob::from_json(json_body(&headers, &body)?)?;
    let listing = state
        .jobs
        .create(input)
        .await
        .map_err(|e| ApiError::from_job_error(e, "Failed to create job"))?;
    Ok((StatusCode::CREATED, Json(listing)))
}
