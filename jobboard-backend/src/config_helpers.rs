use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::sync::Arc;

use jobboard_config::Config;
use jobboard_db::{DbConnectionConfig, DocumentStore, MemoryDocumentStore, SqliteDocumentStore};

/// Build database connection config from application config.
pub fn database_config_from_config(cfg: &Config) -> DbConnectionConfig {
    let path = cfg.database.path.as_deref().unwrap_or("jobboard.sqlite");
    let url = if path.starts_with("sqlite:") {
        path.to_string()
    } else {
        format!("sqlite://{path}")
    };
    let mut db = DbConnectionConfig::new(url);
    if let Some(max) = cfg.database.max_connections {
        db.max_connections = max;
        db.min_connections = db.min_connections.min(max);
    }
    if let Some(secs) = cfg.database.connect_timeout_secs {
        db.connect_timeout_secs = secs;
    }
    db
}

/// Construct the document store named by `database.driver`. Not yet connected.
pub fn store_from_config(cfg: &Config) -> Arc<dyn DocumentStore> {
    match cfg.database.driver.as_str() {
        "memory" => Arc::new(MemoryDocumentStore::new()),
        _ => Arc::new(SqliteDocumentStore::new(database_config_from_config(cfg))),
    }
}

/// Parse host:port into a SocketAddr, with fallback to 0.0.0.0.
pub fn parse_bind_address(host: &str, port: u16) -> SocketAddr {
    host.parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, port))
        .or_else(|_| host.parse::<SocketAddr>())
        .or_else(|_| host.parse::<Ipv6Addr>().map(|ip| SocketAddr::new(IpAddr::V6(ip), port)))
        .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], port)))
}
