use std::sync::Arc;

use axum::extract::{Extension, Json};
use jobboard_core::Listing;

use crate::{error::ApiError, state::AppState};

/// GET /jobs
pub async fn list(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<Listing>>, ApiError> {
    let listings = state
        .jobs
        .list()
        .await
        .map_err(|e| ApiError::from_job_error(e, "Failed to fetch jobs"))?;
    Ok(Json(listings))
}
