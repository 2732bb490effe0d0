use thiserror::Error;

/// Errors that can occur while configuring or creating the database pool.
#[derive(Debug, Error)]
pub enum DbConnectionError {
    #[error("database url cannot be empty")]
    EmptyDatabaseUrl,
    #[error("invalid pool size: {setting} {reason}")]
    InvalidPoolSize {
        setting: &'static str,
        reason: &'static str,
    },
    #[error("file/directory creation error: {0}")]
    FileCreation(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DbConnectionError {
    /// Whether the failure means the database could not be reached at all,
    /// as opposed to a misconfiguration.
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::Sqlx(err) => matches!(
                err,
                sqlx::Error::Io(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::WorkerCrashed
                    | sqlx::Error::Tls(_)
            ),
            Self::FileCreation(_) => true,
            _ => false,
        }
    }
}
