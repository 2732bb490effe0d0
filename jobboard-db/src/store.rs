use async_trait::async_trait;
use jobboard_core::{DocumentId, Fields, StoredDocument};
use serde::Serialize;

use crate::error::StoreError;
use crate::filter::{DocumentFilter, FindOptions};

/// Name of the collection holding listings.
pub const COLLECTION: &str = "jobs";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub collections: Vec<String>,
    pub documents: u64,
}

/// A collection of schemaless documents.
///
/// Every operation fails with [`StoreError::Unavailable`] while the store is
/// not connected.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name for logs and diagnostics.
    fn backend(&self) -> &'static str;

    async fn connect(&self) -> Result<(), StoreError>;

    async fn close(&self);

    async fn is_connected(&self) -> bool;

    async fn ping(&self) -> Result<(), StoreError>;

    async fn find(
        &self,
        filter: &DocumentFilter,
        options: &FindOptions,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    async fn find_one(&self, id: &DocumentId) -> Result<Option<StoredDocument>, StoreError>;

    /// Stores `fields` as a new document and returns the assigned identifier.
    async fn insert_one(&self, fields: Fields) -> Result<DocumentId, StoreError>;

    /// Merges `patch` into the document. Returns the number of matched documents.
    async fn update_one(&self, id: &DocumentId, patch: Fields) -> Result<u64, StoreError>;

    /// Returns the number of deleted documents.
    async fn delete_one(&self, id: &DocumentId) -> Result<u64, StoreError>;

    async fn stats(&self) -> Result<StoreStats, StoreError>;
}
