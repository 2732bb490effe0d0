use async_trait::async_trait;
use jobboard_core::{DocumentId, Fields, StoredDocument};
use jobboard_db_connection::{create_pool, sanitize_database_url, DbConnectionConfig, DbPool};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::filter::{sort_documents, DocumentFilter, FindOptions};
use crate::queries::{jobs, schema};
use crate::store::{DocumentStore, StoreStats};

/// Listings held as JSON documents in a SQLite table.
///
/// The pool is opened by [`DocumentStore::connect`], which also applies the
/// migrations, and dropped again by [`DocumentStore::close`].
pub struct SqliteDocumentStore {
    config: DbConnectionConfig,
    pool: RwLock<Option<DbPool>>,
}

impl SqliteDocumentStore {
    pub fn new(config: DbConnectionConfig) -> Self {
        Self {
            config,
            pool: RwLock::new(None),
        }
    }

    async fn pool(&self) -> Result<DbPool, StoreError> {
        self.pool
            .read()
            .await
            .clone()
            .ok_or_else(StoreError::not_connected)
    }
}

fn decode(row: jobs::JobRow) -> Result<StoredDocument, StoreError> {
    let id = DocumentId::parse(&row.id).ok_or_else(|| StoreError::Corrupt {
        id: row.id.clone(),
        reason: "identifier is not a uuid".to_string(),
    })?;
    let body = serde_json::from_str(&row.document).map_err(|e| StoreError::Corrupt {
        id: row.id.clone(),
        reason: e.to_string(),
    })?;
    Ok(StoredDocument::from_body_json(id, body))
}

fn encode(doc: &StoredDocument) -> Result<String, StoreError> {
    serde_json::to_string(&doc.body_json()).map_err(|e| StoreError::Query(e.to_string()))
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn connect(&self) -> Result<(), StoreError> {
        let mut guard = self.pool.write().await;
        if guard.is_some() {
            return Ok(());
        }
        let pool = create_pool(&self.config).await?;
        if let Err(err) = jobboard_migrations::sqlite_migrator().run(&pool).await {
            pool.close().await;
            return Err(err.into());
        }
        tracing::info!(
            database = %sanitize_database_url(&self.config.url),
            "document store connected"
        );
        *guard = Some(pool);
        Ok(())
    }

    async fn close(&self) {
        if let Some(pool) = self.pool.write().await.take() {
            pool.close().await;
            tracing::info!("document store closed");
        }
    }

    async fn is_connected(&self) -> bool {
        self.pool.read().await.is_some()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let pool = self.pool().await?;
        schema::ping(&pool).await?;
        Ok(())
    }

    async fn find(
        &self,
        filter: &DocumentFilter,
        options: &FindOptions,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let pool = self.pool().await?;
        let rows = jobs::find_matching(&pool, filter).await?;
        let mut docs = rows.into_iter().map(decode).collect::<Result<Vec<_>, _>>()?;
        if let Some((field, order)) = &options.sort {
            sort_documents(&mut docs, field, *order);
        }
        Ok(docs)
    }

    async fn find_one(&self, id: &DocumentId) -> Result<Option<StoredDocument>, StoreError> {
        let pool = self.pool().await?;
        jobs::find_by_id(&pool, &id.to_string())
            .await?
            .map(decode)
            .transpose()
    }

    async fn insert_one(&self, fields: Fields) -> Result<DocumentId, StoreError> {
        let pool = self.pool().await?;
        let doc = StoredDocument::new(DocumentId::new(), fields);
        jobs::insert(&pool, &doc.id.to_string(), &encode(&doc)?).await?;
        Ok(doc.id)
    }

    async fn update_one(&self, id: &DocumentId, patch: Fields) -> Result<u64, StoreError> {
        let pool = self.pool().await?;
        let key = id.to_string();
        // Take the write lock up front; a deferred read would fail to upgrade
        // with SQLITE_BUSY when another writer commits first.
        let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;
        let Some(row) = jobs::find_by_id(&mut *tx, &key).await? else {
            tx.rollback().await?;
            return Ok(0);
        };
        let mut doc = decode(row)?;
        doc.apply(patch);
        let matched = jobs::replace_document(&mut *tx, &key, &encode(&doc)?).await?;
        tx.commit().await?;
        Ok(matched)
    }

    async fn delete_one(&self, id: &DocumentId) -> Result<u64, StoreError> {
        let pool = self.pool().await?;
        Ok(jobs::delete(&pool, &id.to_string()).await?)
    }

    async fn stats(&self) -> Result<StoreStats, StoreError> {
        let pool = self.pool().await?;
        let collections = schema::table_names(&pool).await?;
        let documents = jobs::count(&pool).await?;
        Ok(StoreStats {
            collections,
            documents: u64::try_from(documents).unwrap_or_default(),
        })
    }
}
