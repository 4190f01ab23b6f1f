//! Integration tests for Sweet Creations.
//!
//! Each test spawns the real storefront router on an ephemeral port and
//! talks to it over HTTP with a cookie-keeping client, so session handling
//! is exercised the way a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sweet-creations-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_catalog` - listing, filtering and store detail
//! - `storefront_cart` - session cart flow
//! - `firestore_catalog` - Firestore REST client against a local stand-in

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use reqwest::Client;
use tokio::net::TcpListener;

use sweet_creations_storefront::catalog::{CatalogRepository, InMemoryCatalog};
use sweet_creations_storefront::config::{CatalogSource, LogFormat, StorefrontConfig};
use sweet_creations_storefront::state::AppState;

/// Path of the sample catalog shipped with the storefront.
#[must_use]
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/fixtures/catalog.yaml")
}

/// Serve `app` on an ephemeral local port.
///
/// # Panics
///
/// Panics if no port can be bound.
pub async fn serve(app: axum::Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    addr
}

/// A running storefront plus a client that keeps its session cookie.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Storefront over the sample fixture.
    ///
    /// # Panics
    ///
    /// Panics if the fixture cannot be loaded.
    pub async fn spawn() -> Self {
        let catalog = InMemoryCatalog::load(&fixture_path())
            .await
            .expect("load sample fixture");
        Self::spawn_with(Arc::new(catalog)).await
    }

    /// Storefront over any repository.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot start.
    pub async fn spawn_with(catalog: Arc<dyn CatalogRepository>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");

        let config = StorefrontConfig {
            host: addr.ip(),
            port: addr.port(),
            base_url: format!("http://{addr}"),
            catalog: CatalogSource::Fixture(fixture_path()),
            sentry_dsn: None,
            sentry_environment: None,
            log_format: LogFormat::Pretty,
        };
        let app = sweet_creations_storefront::app(AppState::new(config, catalog));
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("storefront server");
        });

        Self {
            client: Client::builder()
                .cookie_store(true)
                .build()
                .expect("build client"),
            base_url: format!("http://{addr}"),
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET `path` and decode the JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, serde_json::Value) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("send request");
        let status = response.status();
        (status, response.json().await.expect("JSON body"))
    }

    /// POST a JSON body to `path` and decode the JSON response.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> (reqwest::StatusCode, serde_json::Value) {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("send request");
        let status = response.status();
        (status, response.json().await.expect("JSON body"))
    }
}
