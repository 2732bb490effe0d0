//! Document store adapter for job listings.
//!
//! The rest of the service talks to a [`DocumentStore`]; the SQLite backend
//! keeps each listing as a JSON document and the memory backend keeps them
//! in a vector.

pub mod error;
pub mod filter;
pub mod memory;
pub mod queries;
pub mod sqlite;
pub mod store;

pub type DbBackend = sqlx::Sqlite;

pub use error::StoreError;
pub use filter::{sort_documents, DocumentFilter, FindOptions, SortOrder};
pub use jobboard_db_connection::{create_pool, DbConnectionConfig, DbConnectionError, DbPool};
pub use memory::MemoryDocumentStore;
pub use sqlite::SqliteDocumentStore;
pub use store::{DocumentStore, StoreStats, COLLECTION};
