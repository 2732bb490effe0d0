use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use tower_http::services::ServeDir;

use crate::handlers::{diagnostics, jobs};
use crate::state::AppState;

// Listings are small; 1 MB leaves room for long descriptions.
const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Build the primary axum router with the provided shared application state.
///
/// API routes live under `/api`; anything else is served from `static/`.
pub fn build_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/jobs", get(jobs::list).post(jobs::create))
        .route(
            "/jobs/{id}",
            get(jobs::get).put(jobs::update).delete(jobs::delete),
        )
        .route("/test-db", get(diagnostics::test_db))
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
        .layer(Extension(state));

    let static_service = ServeDir::new("static").append_index_html_on_directories(true);

    Router::new()
        .nest("/api", router)
        .fallback_service(static_service)
}

async fn health_handler() -> impl IntoResponse {
    // Liveness: always 200 while the process is up.
    (StatusCode::OK, "OK")
}

async fn ready_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    match state.store().ping().await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(err) => {
            tracing::debug!(error = %err, "readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "store unavailable")
        }
    }
}
