use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Extension, Json, Path};
use jobboard_core::Listing;

use crate::handlers::utils::job_id;
use crate::{error::ApiError, state::AppState};

pub async fn get(
    Extension(state): Extension<Arc<AppState>>,
    Path(path): Path<HashMap<String, String>>,
) -> Result<Json<Listing>, ApiError> {
    let id = job_id(&path)?;
    tracing::debug!(%id, "fetching listing");
    let listing = state
        .jobs
        .get(id)
        .await
        .map_err(|e| ApiError::from_job_error(e, "Failed to fetch job"))?;
    Ok(Json(listing))
}
