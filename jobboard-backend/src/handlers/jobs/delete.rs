use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Extension, Json, Path};
use serde_json::{json, Value};

use crate::handlers::utils::job_id;
use crate::{error::ApiError, state::AppState};

pub async fn delete(
    Extension(state): Extension<Arc<AppState>>,
    Path(path): Path<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let id = job_id(&path)?;
    state
        .jobs
        .delete(id)
        .await
        .map_err(|e| ApiError::from_job_error(e, "Failed to delete job"))?;
    Ok(Json(json!({ "message": "Job deleted successfully" })))
}
