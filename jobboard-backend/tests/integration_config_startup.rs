use std::net::Ipv4Addr;
use std::sync::Arc;

use jobboard_backend::build_router;
use jobboard_backend::service::FallbackPolicy;
use jobboard_backend::state::AppState;
use jobboard_db::{DbConnectionConfig, DocumentStore, SqliteDocumentStore};

#[tokio::test]
async fn startup_with_config_binds_and_serves_listings() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("jobboard.toml");
    let db_path = dir.path().join("data").join("jobs.sqlite");
    std::fs::write(
        &config_path,
        format!(
            "[database]\ndriver = \"sqlite\"\npath = \"{}\"\n\n[listings]\nfallback_on_empty = false\n",
            db_path.display()
        ),
    )
    .expect("write config");

    let cfg = jobboard_config::load_config(Some(&config_path)).expect("load config");
    jobboard_config::validate_config(&cfg).expect("valid config");
    assert!(!cfg.listings.fallback_on_empty);

    let url = format!("sqlite://{}", cfg.database.path.as_deref().unwrap());
    let store = Arc::new(SqliteDocumentStore::new(DbConnectionConfig::new(url)));
    store.connect().await.expect("connect");
    assert!(db_path.exists());

    let state = AppState::new(store.clone(), FallbackPolicy::from(&cfg.listings));
    let router = build_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local_addr");
    let handle = tokio::spawn(async move {
        axum::serve(listener, router.into_make_service())
            .await
            .unwrap();
    });

    let base = format!("http://{}:{}", addr.ip(), addr.port());
    let res = reqwest::get(format!("{base}/api/health")).await.expect("health");
    assert!(res.status().is_success());

    let res = reqwest::get(format!("{base}/api/jobs")).await.expect("jobs");
    assert!(res.status().is_success());
    let listings: Vec<serde_json::Value> = res.json().await.expect("json body");
    assert!(listings.is_empty());

    handle.abort();
    store.close().await;
}
