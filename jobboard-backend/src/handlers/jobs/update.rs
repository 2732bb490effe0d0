use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Extension, Json, Path};
use axum::http::HeaderMap;
use jobboard_core::Listing;

use crate::handlers::utils::{job_id, json_body};
use crate::service::JobPatch;
use crate::{error::ApiError, state::AppState};

pub async fn update(
    Extension(state): Extension<Arc<AppState>>,
    Path(path): Path<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Listing>, ApiError> {
    let id = job_id(&path)?;
    let patch = JobPatch::from_json(json_body(&headers, &body)?)?;
    let listing = state
        .jobs
        .update(id, patch)
        .await
        .map_err(|e| ApiError::from_job_error(e, "Failed to update job"))?;
    Ok(Json(listing))
}
