use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use jobboard_core::{DocumentId, Fields, StoredDocument};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::filter::{sort_documents, DocumentFilter, FindOptions};
use crate::store::{DocumentStore, StoreStats, COLLECTION};

/// Process-local store. Documents are kept in insertion order and lost on exit.
#[derive(Default)]
pub struct MemoryDocumentStore {
    docs: RwLock<Vec<StoredDocument>>,
    connected: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A connected store holding `docs`, which may use any field representation.
    pub fn with_documents(docs: Vec<StoredDocument>) -> Self {
        Self {
            docs: RwLock::new(docs),
            connected: AtomicBool::new(true),
        }
    }

    fn ensure_connected(&self) -> Result<(), StoreError> {
        if self.connected.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(StoreError::not_connected())
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn connect(&self) -> Result<(), StoreError> {
        self.connected.store(true, Ordering::Release);
        Ok(())
    }

    async fn close(&self) {
        self.connected.store(false, Ordering::Release);
    }

    async fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.ensure_connected()
    }

    async fn find(
        &self,
        filter: &DocumentFilter,
        options: &FindOptions,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        self.ensure_connected()?;
        let mut docs: Vec<StoredDocument> = self
            .docs
            .read()
            .await
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect();
        if let Some((field, order)) = &options.sort {
            sort_documents(&mut docs, field, *order);
        }
        Ok(docs)
    }

    async fn find_one(&self, id: &DocumentId) -> Result<Option<StoredDocument>, StoreError> {
        self.ensure_connected()?;
        Ok(self.docs.read().await.iter().find(|d| d.id == *id).cloned())
    }

    async fn insert_one(&self, fields: Fields) -> Result<DocumentId, StoreError> {
        self.ensure_connected()?;
        let id = DocumentId::new();
        self.docs.write().await.push(StoredDocument::new(id, fields));
        Ok(id)
    }

    async fn update_one(&self, id: &DocumentId, patch: Fields) -> Result<u64, StoreError> {
        self.ensure_connected()?;
        let mut docs = self.docs.write().await;
        match docs.iter_mut().find(|d| d.id == *id) {
            Some(doc) => {
                doc.apply(patch);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, id: &DocumentId) -> Result<u64, StoreError> {
        self.ensure_connected()?;
        let mut docs = self.docs.write().await;
        let before = docs.len();
        docs.retain(|d| d.id != *id);
        Ok((before - docs.len()) as u64)
    }

    async fn stats(&self) -> Result<StoreStats, StoreError> {
        self.ensure_connected()?;
        Ok(StoreStats {
            collections: vec![COLLECTION.to_string()],
            documents: self.docs.read().await.len() as u64,
        })
    }
}
