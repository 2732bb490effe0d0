use std::sync::Arc;

use chrono::{TimeZone, Utc};
use jobboard_core::document::fields;
use jobboard_core::{DocumentId, DocumentValue, Fields};
use jobboard_db::{
    DbConnectionConfig, DocumentFilter, DocumentStore, FindOptions, MemoryDocumentStore,
    SortOrder, SqliteDocumentStore,
};

fn listing_fields(title: &str, status: &str, hour: u32) -> Fields {
    let mut f = Fields::new();
    f.insert(fields::TITLE.into(), title.into());
    f.insert(fields::STATUS.into(), status.into());
    f.insert(fields::LOCATION.into(), "Pune".into());
    f.insert(
        fields::CREATED_AT.into(),
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap().into(),
    );
    f
}

async fn sqlite_store() -> SqliteDocumentStore {
    let store = SqliteDocumentStore::new(DbConnectionConfig::new("sqlite::memory:"));
    store.connect().await.expect("connect");
    store
}

fn titles(docs: &[jobboard_core::StoredDocument]) -> Vec<String> {
    docs.iter()
        .map(|d| {
            d.get(fields::TITLE)
                .and_then(DocumentValue::as_str)
                .unwrap_or_default()
                .to_string()
        })
        .collect()
}

async fn exercise_crud(store: &dyn DocumentStore) {
    let a = store.insert_one(listing_fields("A", "published", 1)).await.unwrap();
    let _b = store.insert_one(listing_fields("B", "draft", 3)).await.unwrap();
    let _c = store.insert_one(listing_fields("C", "published", 2)).await.unwrap();

    let published = store
        .find(
            &DocumentFilter::all().eq(fields::STATUS, "published"),
            &FindOptions::sorted_by(fields::CREATED_AT, SortOrder::Descending),
        )
        .await
        .unwrap();
    assert_eq!(titles(&published), vec!["C", "A"]);

    let found = store.find_one(&a).await.unwrap().expect("inserted document");
    assert_eq!(found.id, a);
    assert!(found.get(fields::CREATED_AT).unwrap().as_timestamp().is_some());

    let mut patch = Fields::new();
    patch.insert(fields::TITLE.into(), "A2".into());
    assert_eq!(store.update_one(&a, patch).await.unwrap(), 1);
    let found = store.find_one(&a).await.unwrap().unwrap();
    assert_eq!(found.get(fields::TITLE).and_then(DocumentValue::as_str), Some("A2"));
    assert_eq!(found.get(fields::LOCATION).and_then(DocumentValue::as_str), Some("Pune"));

    let missing = DocumentId::new();
    assert_eq!(store.update_one(&missing, Fields::new()).await.unwrap(), 0);
    assert!(store.find_one(&missing).await.unwrap().is_none());

    assert_eq!(store.delete_one(&a).await.unwrap(), 1);
    assert_eq!(store.delete_one(&a).await.unwrap(), 0);
    assert_eq!(store.stats().await.unwrap().documents, 2);
}

#[tokio::test]
async fn sqlite_store_crud() {
    let store = sqlite_store().await;
    exercise_crud(&store).await;
    let stats = store.stats().await.unwrap();
    assert_eq!(stats.collections, vec!["jobs".to_string()]);
}

#[tokio::test]
async fn memory_store_crud() {
    let store = MemoryDocumentStore::new();
    store.connect().await.unwrap();
    exercise_crud(&store).await;
}

#[tokio::test]
async fn closed_store_is_unavailable() {
    let store = sqlite_store().await;
    store.ping().await.unwrap();
    store.close().await;
    assert!(!store.is_connected().await);
    let err = store
        .find(&DocumentFilter::all(), &FindOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_unavailable());

    let memory = MemoryDocumentStore::new();
    assert!(memory.ping().await.unwrap_err().is_unavailable());
}

#[tokio::test]
async fn never_connected_store_is_unavailable() {
    let store = SqliteDocumentStore::new(DbConnectionConfig::new("sqlite::memory:"));
    let err = store.insert_one(Fields::new()).await.unwrap_err();
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn file_store_keeps_documents_across_reconnects() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("jobs.sqlite").display());
    let store = SqliteDocumentStore::new(DbConnectionConfig::new(url));
    store.connect().await.unwrap();
    let id = store.insert_one(listing_fields("Kept", "published", 5)).await.unwrap();
    store.close().await;

    store.connect().await.unwrap();
    let doc = store.find_one(&id).await.unwrap().expect("persisted");
    assert_eq!(doc.get(fields::TITLE).and_then(DocumentValue::as_str), Some("Kept"));
}

#[tokio::test]
async fn equal_timestamps_keep_insertion_order() {
    let store = sqlite_store().await;
    for title in ["first", "second", "third"] {
        store.insert_one(listing_fields(title, "published", 4)).await.unwrap();
    }
    let docs = store
        .find(
            &DocumentFilter::all(),
            &FindOptions::sorted_by(fields::CREATED_AT, SortOrder::Descending),
        )
        .await
        .unwrap();
    assert_eq!(titles(&docs), vec!["first", "second", "third"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_to_one_listing_all_apply() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("jobs.sqlite").display());
    let store = Arc::new(SqliteDocumentStore::new(DbConnectionConfig::new(url)));
    store.connect().await.unwrap();
    let id = store.insert_one(listing_fields("Original", "published", 6)).await.unwrap();

    let writers: Vec<_> = (0..32)
        .map(|n| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                let mut patch = Fields::new();
                patch.insert(fields::TITLE.into(), format!("t{n}").into());
                store.update_one(&id, patch).await
            })
        })
        .collect();
    for writer in writers {
        assert_eq!(writer.await.unwrap().unwrap(), 1);
    }

    let doc = store.find_one(&id).await.unwrap().expect("still stored");
    let title = doc.get(fields::TITLE).and_then(DocumentValue::as_str).unwrap();
    assert!(title.starts_with('t'), "unexpected title {title}");
    assert_eq!(doc.get(fields::STATUS).and_then(DocumentValue::as_str), Some("published"));
    store.close().await;
}
