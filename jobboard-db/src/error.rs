use jobboard_db_connection::DbConnectionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store is not connected or could not be reached.
    #[error("document store unavailable: {0}")]
    Unavailable(String),
    #[error("document store query failed: {0}")]
    Query(String),
    #[error("stored document {id} is corrupt: {reason}")]
    Corrupt { id: String, reason: String },
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }

    pub(crate) fn not_connected() -> Self {
        StoreError::Unavailable("not connected".to_string())
    }
}

impl From<DbConnectionError> for StoreError {
    fn from(err: DbConnectionError) -> Self {
        if err.is_connectivity() {
            StoreError::Unavailable(err.to_string())
        } else {
            StoreError::Query(err.to_string())
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        DbConnectionError::from(err).into()
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::Query(format!("migration failed: {err}"))
    }
}
