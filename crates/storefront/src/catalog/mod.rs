//! Catalog repository: where stores and categories come from.
//!
//! # Implementations
//!
//! - [`FirestoreCatalog`] - Cloud Firestore over its REST API
//! - [`InMemoryCatalog`] - a fixture file loaded at startup
//!
//! Both return the current snapshot on every call. Filtering for the
//! storefront listing happens in `sweet_creations_core::filter`; the
//! `list_stores_by_category` / `search_stores_by_term` operations are the
//! repository-side equivalents for tools that prefer to push filtering down.

pub mod documents;
pub mod firestore;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use sweet_creations_core::{Store, StoreCategory, StoreId, StoreKind};

use crate::config::CatalogSource;

pub use documents::DocumentError;
pub use firestore::FirestoreCatalog;
pub use memory::{CatalogFixture, FixtureError, InMemoryCatalog};

/// Errors fetching or writing catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The database answered with a non-success status.
    #[error("Catalog returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A document could not be turned into a catalog record.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The fixture file could not be loaded.
    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

/// Read access to the catalog.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Every store, in repository order.
    async fn list_stores(&self) -> Result<Vec<Store>, CatalogError>;

    /// Every category, in repository order.
    async fn list_categories(&self) -> Result<Vec<StoreCategory>, CatalogError>;

    /// A single store, `None` if it does not exist.
    async fn find_store_by_id(&self, id: &StoreId) -> Result<Option<Store>, CatalogError>;

    /// Stores of one kind, highest rating first.
    async fn list_stores_by_category(&self, kind: StoreKind) -> Result<Vec<Store>, CatalogError>;

    /// Stores whose name, description or specialties contain `term`.
    async fn search_stores_by_term(&self, term: &str) -> Result<Vec<Store>, CatalogError>;

    /// Open stores, highest rating first.
    async fn list_open_stores(&self) -> Result<Vec<Store>, CatalogError>;
}

/// Write access, used for seeding.
#[async_trait]
pub trait CatalogWriter: CatalogRepository {
    /// Create or replace a store document.
    async fn put_store(&self, store: &Store) -> Result<(), CatalogError>;

    /// Create or replace a category document.
    async fn put_category(&self, category: &StoreCategory) -> Result<(), CatalogError>;

    /// Delete a store document.
    async fn delete_store(&self, id: &StoreId) -> Result<(), CatalogError>;
}

/// Build the repository selected by configuration.
///
/// # Errors
///
/// Returns `CatalogError::Fixture` if a fixture file cannot be loaded.
pub async fn connect(source: &CatalogSource) -> Result<Arc<dyn CatalogRepository>, CatalogError> {
    match source {
        CatalogSource::Firestore(config) => Ok(Arc::new(FirestoreCatalog::new(config))),
        CatalogSource::Fixture(path) => Ok(Arc::new(InMemoryCatalog::load(path).await?)),
    }
}

/// Server-side search semantics: `term` (already lowercased) is contained in
/// the name, the description, or the specialties joined by spaces.
pub(crate) fn matches_search_term(store: &Store, term: &str) -> bool {
    store.name.to_lowercase().contains(term)
        || store.description.to_lowercase().contains(term)
        || store.specialties.join(" ").to_lowercase().contains(term)
}

/// Sort by rating, highest first. Stable for equal ratings.
pub(crate) fn sort_by_rating_desc(stores: &mut [Store]) {
    stores.sort_by(|a, b| b.rating.total_cmp(&a.rating));
}
