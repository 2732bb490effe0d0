use std::time::Duration;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::config::DbConnectionConfig;
use crate::error::DbConnectionError;
use crate::utils::config_metadata;

pub type DbPool = SqlitePool;

// SQLite memory database patterns for efficient checking
pub const SQLITE_MEMORY_PATTERNS: &[&[u8]] = &[b":memory:", b"mode=memory"];

/// Whether `url` names an in-memory SQLite database.
pub fn is_memory_url(url: &str) -> bool {
    let url_bytes = url.as_bytes();
    SQLITE_MEMORY_PATTERNS.iter().any(|&pattern| {
        url_bytes
            .windows(pattern.len())
            .any(|w| w.eq_ignore_ascii_case(pattern))
    })
}

/// Creates a new SQLite connection pool using the provided configuration.
///
/// Each connection to an in-memory database opens its own empty database, so
/// such pools are pinned to a single connection that is never recycled.
pub async fn create_pool(config: &DbConnectionConfig) -> Result<DbPool, DbConnectionError> {
    let metadata = config_metadata(config);
    tracing::debug!(%metadata, "creating database pool");

    match create_pool_inner(config).await {
        Ok(pool) => {
            tracing::info!(%metadata, "database pool created");
            Ok(pool)
        }
        Err(err) => {
            tracing::warn!(%metadata, error = %err, "database pool creation failed");
            Err(err)
        }
    }
}

async fn create_pool_inner(config: &DbConnectionConfig) -> Result<DbPool, DbConnectionError> {
    let url = config.url.trim();
    if url.is_empty() {
        return Err(DbConnectionError::EmptyDatabaseUrl);
    }
    config.validate()?;

    let mut opts = SqlitePoolOptions::new().acquire_timeout(config.connect_timeout());

    if is_memory_url(url) {
        opts = opts
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>);
    } else {
        ensure_sqlite_db_file_exists(url)?;
        opts = opts
            .max_connections(config.max_connections)
            .min_connections(config.min_connections);
        if let Some(idle) = config.idle_timeout() {
            opts = opts.idle_timeout(idle);
        }
    }

    opts.connect(url).await.map_err(Into::into)
}

/// Make sure the parent directory and file of a file-backed database exist,
/// otherwise sqlx fails with "unable to open database file".
fn ensure_sqlite_db_file_exists(database_url: &str) -> Result<(), DbConnectionError> {
    use std::fs::{create_dir_all, File};
    use std::io;
    use std::path::Path;

    let Some(clean_path) = extract_sqlite_path(database_url) else {
        return Ok(());
    };

    let db_path = Path::new(clean_path);
    if let Some(parent) = db_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty() && !p.exists())
    {
        create_dir_all(parent).map_err(|e| {
            DbConnectionError::FileCreation(format!(
                "failed to create parent directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    if !db_path.exists() {
        File::create(db_path).map_err(|e| {
            let msg = if e.kind() == io::ErrorKind::PermissionDenied {
                format!("permission denied creating '{}': {e}", db_path.display())
            } else {
                format!("failed to create DB file '{}': {e}", db_path.display())
            };
            DbConnectionError::FileCreation(msg)
        })?;
    }

    Ok(())
}

/// File path of a SQLite connection URL; `None` for in-memory databases or empty paths.
pub(crate) fn extract_sqlite_path(url: &str) -> Option<&str> {
    if is_memory_url(url) {
        return None;
    }

    let mut path = url;
    path = path
        .strip_prefix("sqlite://")
        .or_else(|| path.strip_prefix("sqlite:"))
        .unwrap_or(path);
    path = path.strip_prefix("//").unwrap_or(path);
    path = path.strip_prefix("file:").unwrap_or(path);

    if let Some(idx) = path.find('?') {
        path = &path[..idx];
    }

    let path = path.trim();
    if path.is_empty() {
        return None;
    }

    // On Windows: strip leading slash before drive letter ("/C:/...")
    if path.len() > 2 && path.starts_with('/') && path.as_bytes().get(2) == Some(&b':') {
        Some(&path[1..])
    } else {
        Some(path)
    }
}
