use std::sync::Arc;

use axum::extract::{Extension, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /test-db
///
/// Reports store reachability and contents. Always answers 200; failures are
/// described in the body.
pub async fn test_db(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    let store = state.store();
    let backend = store.backend();
    let result = match store.ping().await {
        Ok(()) => store.stats().await,
        Err(err) => Err(err),
    };
    match result {
        Ok(stats) => Json(json!({
            "status": "success",
            "message": "Database connection successful",
            "collections": stats.collections,
            "jobsCount": stats.documents,
            "store": backend,
        })),
        Err(err) => {
            tracing::warn!(error = %err, store = backend, "store diagnostics failed");
            Json(json!({
                "status": "error",
                "message": err.to_string(),
                "store": backend,
            }))
        }
    }
}
