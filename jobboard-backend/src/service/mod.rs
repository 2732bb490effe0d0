//! Listing operations over the document store, with validation and the
//! fallback-data policy for the listing query.

pub mod fallback;
pub mod input;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jobboard_config::ListingsConfig;
use jobboard_core::document::fields;
use jobboard_core::{
    normalize, DocumentId, DocumentValue, Fields, Listing, ListingError, ListingStatus,
    StoredDocument,
};
use jobboard_db::{DocumentFilter, DocumentStore, FindOptions, SortOrder, StoreError};
use thiserror::Error;

pub use fallback::sample_listings;
pub use input::{CreateJob, JobPatch, ListingUpdate, NewListing};

#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Invalid(#[from] ListingError),
    #[error("identifier is not in the store's format")]
    InvalidIdentifier,
    #[error("listing not found")]
    NotFound,
    #[error("document store unavailable")]
    StoreUnavailable,
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for JobError {
    fn from(err: StoreError) -> Self {
        if err.is_unavailable() {
            JobError::StoreUnavailable
        } else {
            JobError::Store(err)
        }
    }
}

/// When the listing query serves sample data instead of store results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackPolicy {
    pub on_empty: bool,
    pub on_error: bool,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            on_empty: true,
            on_error: true,
        }
    }
}

impl From<&ListingsConfig> for FallbackPolicy {
    fn from(cfg: &ListingsConfig) -> Self {
        Self {
            on_empty: cfg.fallback_on_empty,
            on_error: cfg.fallback_on_error,
        }
    }
}

pub struct JobService {
    store: Arc<dyn DocumentStore>,
    policy: FallbackPolicy,
    fallback: Vec<Listing>,
}

fn parse_id(raw: &str) -> Result<DocumentId, JobError> {
    DocumentId::parse(raw).ok_or(JobError::InvalidIdentifier)
}

fn timestamp_of(doc: &StoredDocument, field: &str) -> Option<DateTime<Utc>> {
    match doc.get(field)? {
        DocumentValue::Timestamp(ts) => Some(*ts),
        other => DateTime::parse_from_rfc3339(other.as_str()?)
            .ok()
            .map(|ts| ts.with_timezone(&Utc)),
    }
}

impl JobService {
    pub fn new(store: Arc<dyn DocumentStore>, policy: FallbackPolicy) -> Self {
        Self {
            store,
            policy,
            fallback: sample_listings(Utc::now()),
        }
    }

    pub fn with_fallback(mut self, listings: Vec<Listing>) -> Self {
        self.fallback = listings;
        self
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    pub fn fallback_listings(&self) -> &[Listing] {
        &self.fallback
    }

    fn fallback_for(&self, status: ListingStatus) -> Vec<Listing> {
        self.fallback
            .iter()
            .filter(|l| l.status == status.as_str())
            .cloned()
            .collect()
    }

    /// Published listings, newest first.
    pub async fn list(&self) -> Result<Vec<Listing>, JobError> {
        self.list_with_status(ListingStatus::Published).await
    }

    pub async fn list_with_status(&self, status: ListingStatus) -> Result<Vec<Listing>, JobError> {
        let filter = DocumentFilter::all().eq(fields::STATUS, status.as_str());
        let options = FindOptions::sorted_by(fields::CREATED_AT, SortOrder::Descending);
        match self.store.find(&filter, &options).await {
            Ok(docs) if docs.is_empty() && self.policy.on_empty => {
                tracing::info!(%status, "no listings stored, serving sample listings");
                Ok(self.fallback_for(status))
            }
            Ok(docs) => {
                tracing::debug!(%status, count = docs.len(), "listings fetched");
                Ok(docs.into_iter().map(normalize).collect())
            }
            Err(err) if self.policy.on_error => {
                tracing::warn!(%status, error = %err, "listing query failed, serving sample listings");
                Ok(self.fallback_for(status))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn get(&self, raw_id: &str) -> Result<Listing, JobError> {
        let id = parse_id(raw_id)?;
        let doc = self.store.find_one(&id).await?.ok_or(JobError::NotFound)?;
        Ok(normalize(doc))
    }

    /// Validate and store a new listing.
    ///
    /// While the store is unreachable the listing is returned unsaved with a
    /// `mock-` identifier.
    pub async fn create(&self, input: CreateJob) -> Result<Listing, JobError> {
        let listing = input.validate()?;
        let now = Utc::now();
        let body = listing.into_fields(now);

        match self.store.insert_one(body.clone()).await {
            Ok(id) => {
                tracing::info!(%id, "listing created");
                Ok(normalize(StoredDocument::new(id, body)))
            }
            Err(err) if err.is_unavailable() => {
                let listing = unsaved_listing(body, now);
                tracing::warn!(
                    id = %listing.id,
                    error = %err,
                    "document store unavailable, returning unsaved listing"
                );
                Ok(listing)
            }
            Err(err) => Err(JobError::Store(err)),
        }
    }

    /// Apply `patch` and refresh `updatedAt`. The existence check and the
    /// write are separate store calls.
    pub async fn update(&self, raw_id: &str, patch: JobPatch) -> Result<Listing, JobError> {
        let id = parse_id(raw_id)?;
        let ListingUpdate { fields: mut changes, status } = patch.validate()?;

        let current = self.store.find_one(&id).await?.ok_or(JobError::NotFound)?;
        if let Some(next) = status {
            // Values outside the known set predate the state machine.
            let from = current
                .get(fields::STATUS)
                .and_then(DocumentValue::as_str)
                .and_then(|s| s.parse::<ListingStatus>().ok())
                .unwrap_or(ListingStatus::Draft);
            let next = from.transition_to(next)?;
            changes.insert(fields::STATUS.into(), next.as_str().into());
        }

        let updated_at = [
            timestamp_of(&current, fields::UPDATED_AT),
            timestamp_of(&current, fields::CREATED_AT),
        ]
        .into_iter()
        .flatten()
        .fold(Utc::now(), std::cmp::max);
        changes.insert(fields::UPDATED_AT.into(), updated_at.into());

        if self.store.update_one(&id, changes).await? == 0 {
            return Err(JobError::NotFound);
        }
        let doc = self.store.find_one(&id).await?.ok_or(JobError::NotFound)?;
        tracing::info!(%id, "listing updated");
        Ok(normalize(doc))
    }

    pub async fn delete(&self, raw_id: &str) -> Result<(), JobError> {
        let id = parse_id(raw_id)?;
        if self.store.delete_one(&id).await? == 0 {
            return Err(JobError::NotFound);
        }
        tracing::info!(%id, "listing deleted");
        Ok(())
    }
}

fn unsaved_listing(body: Fields, now: DateTime<Utc>) -> Listing {
    let mut listing = normalize(StoredDocument::new(DocumentId::new(), body));
    listing.id = format!("mock-{}", now.timestamp_millis());
    listing
}
