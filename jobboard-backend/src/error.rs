use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use jobboard_core::{format_timestamp, ListingError};
use serde_json::json;
use thiserror::Error;

use crate::service::JobError;

/// Top-level API error shared by all route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation { field: String, message: String },
    #[error("Invalid job ID")]
    InvalidIdentifier,
    #[error("Job not found")]
    NotFound,
    #[error("Database not available")]
    StoreUnavailable,
    #[error("{context}: {details}")]
    Unexpected {
        context: &'static str,
        details: String,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidIdentifier => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = match &self {
            ApiError::Validation { field, message } => json!({ "error": message, "field": field }),
            ApiError::Unexpected { context, details } => json!({
                "error": context,
                "details": details,
                "timestamp": format_timestamp(&chrono::Utc::now()),
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(payload)).into_response()
    }
}

impl ApiError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unexpected(context: &'static str, details: impl ToString) -> Self {
        Self::Unexpected {
            context,
            details: details.to_string(),
        }
    }

    /// Attach a request-specific summary to a service failure.
    pub fn from_job_error(err: JobError, context: &'static str) -> Self {
        match err {
            JobError::Invalid(e) => e.into(),
            JobError::InvalidIdentifier => ApiError::InvalidIdentifier,
            JobError::NotFound => ApiError::NotFound,
            JobError::StoreUnavailable => ApiError::StoreUnavailable,
            JobError::Store(e) => ApiError::unexpected(context, e),
        }
    }
}

impl From<ListingError> for ApiError {
    fn from(err: ListingError) -> Self {
        let message = match &err {
            ListingError::InvalidField { message, .. } => message.clone(),
            other => other.to_string(),
        };
        ApiError::validation(err.field(), message)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation("body", rejection.body_text())
    }
}
