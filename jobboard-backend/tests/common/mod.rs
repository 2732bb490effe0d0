#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use jobboard_backend::service::FallbackPolicy;
use jobboard_backend::state::AppState;
use jobboard_core::document::fields;
use jobboard_core::{DocumentId, Fields, StoredDocument};
use jobboard_db::{
    DbConnectionConfig, DocumentFilter, DocumentStore, FindOptions, SqliteDocumentStore,
    StoreError, StoreStats,
};
use serde_json::{json, Value};
use tower::util::ServiceExt;

pub async fn sqlite_store() -> Arc<dyn DocumentStore> {
    let store = SqliteDocumentStore::new(DbConnectionConfig::new("sqlite::memory:"));
    store.connect().await.expect("connect store");
    Arc::new(store)
}

pub fn app(store: Arc<dyn DocumentStore>, policy: FallbackPolicy) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(store, policy));
    (jobboard_backend::build_router(state.clone()), state)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

/// Send a raw body; returns the status, the response `Content-Type` and the decoded JSON.
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, String, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(ct) = content_type {
        builder = builder.header("content-type", ct);
    }
    let resp = app
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, content_type, value)
}

pub fn valid_payload() -> Value {
    json!({
        "title": "Backend Engineer",
        "companyName": "Acme",
        "location": "Pune",
        "jobType": "Full-time",
        "salaryRange": "₹10L - ₹20L",
        "description": "Build and operate the listing service.",
        "applicationDeadline": "2030-01-31"
    })
}

pub fn stored_fields(title: &str, status: &str, created_at: DateTime<Utc>) -> Fields {
    let mut f = Fields::new();
    f.insert(fields::TITLE.into(), title.into());
    f.insert(fields::COMPANY_NAME.into(), "Acme".into());
    f.insert(fields::LOCATION.into(), "Pune".into());
    f.insert(fields::JOB_TYPE.into(), "Full-time".into());
    f.insert(fields::SALARY_RANGE.into(), "₹10L - ₹20L".into());
    f.insert(fields::DESCRIPTION.into(), "A listing stored directly.".into());
    f.insert(fields::APPLICATION_DEADLINE.into(), created_at.into());
    f.insert(fields::STATUS.into(), status.into());
    f.insert(fields::CREATED_AT.into(), created_at.into());
    f
}

/// A store that is connected but fails every query.
pub struct BrokenStore;

fn broken() -> StoreError {
    StoreError::Query("disk I/O error".to_string())
}

#[async_trait]
impl DocumentStore for BrokenStore {
    fn backend(&self) -> &'static str {
        "broken"
    }

    async fn connect(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn close(&self) {}

    async fn is_connected(&self) -> bool {
        true
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find(
        &self,
        _filter: &DocumentFilter,
        _options: &FindOptions,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        Err(broken())
    }

    async fn find_one(&self, _id: &DocumentId) -> Result<Option<StoredDocument>, StoreError> {
        Err(broken())
    }

    async fn insert_one(&self, _fields: Fields) -> Result<DocumentId, StoreError> {
        Err(broken())
    }

    async fn update_one(&self, _id: &DocumentId, _patch: Fields) -> Result<u64, StoreError> {
        Err(broken())
    }

    async fn delete_one(&self, _id: &DocumentId) -> Result<u64, StoreError> {
        Err(broken())
    }

    async fn stats(&self) -> Result<StoreStats, StoreError> {
        Err(broken())
    }
}
