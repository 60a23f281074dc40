//! Shared harness for HTTP integration tests
//!
//! Starts the real router on an ephemeral port backed by a temporary SQLite
//! file, with "today" pinned through a mock clock.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use paytrack_api::{build_router, AppContext};
use paytrack_common::MockClock;
use paytrack_domain::{Config, DatabaseConfig};
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Date the mock clock starts at.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
}

/// Running server plus handles tests need to inspect or steer it.
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    pub ctx: Arc<AppContext>,
    pub clock: MockClock,
    _temp_dir: TempDir,
}

impl TestServer {
    /// Absolute URL for a path under the API prefix.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Create an entry and return the response JSON.
    pub async fn create(&self, body: &Value) -> Value {
        let resp = self.client.post(self.url("/entries")).json(body).send().await.unwrap();
        assert_eq!(resp.status(), 201, "create should succeed");
        resp.json().await.unwrap()
    }
}

/// Start a server with default configuration.
pub async fn spawn_server() -> TestServer {
    spawn_server_with(|_| {}).await
}

/// Start a server after letting the caller adjust the configuration.
pub async fn spawn_server_with(configure: impl FnOnce(&mut Config)) -> TestServer {
    let temp_dir = TempDir::new().expect("failed to create temporary test directory");
    let db_path = temp_dir.path().join("paytrack.db");

    let mut config = Config {
        database: DatabaseConfig { path: db_path.to_string_lossy().to_string(), pool_size: 4 },
        ..Config::default()
    };
    configure(&mut config);

    let clock = MockClock::new(today());
    let ctx = Arc::new(
        AppContext::new_with_clock(config, Arc::new(clock.clone()))
            .await
            .expect("context should initialise"),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let app = build_router(Arc::clone(&ctx));
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

    let client = reqwest::Client::builder().no_proxy().build().expect("http client");
    let base_url = format!("http://{addr}{}", ctx.config.server.normalized_prefix());

    TestServer { base_url, client, ctx, clock, _temp_dir: temp_dir }
}

/// A complete, valid entry body.
pub fn entry_body(client: &str, date: &str, forecast: &str) -> Value {
    json!({
        "client": client,
        "date": date,
        "product": "Plano Odonto",
        "commission": 75.5,
        "forecast": forecast,
        "status": "pendente"
    })
}
