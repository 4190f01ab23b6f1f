//! In-memory catalog backed by a fixture file.
//!
//! Fixtures are YAML (or JSON, which YAML accepts) with two top-level lists:
//!
//! ```yaml
//! categories:
//!   - { id: "1", name: Todas, icon: "🏪" }
//! stores:
//!   - id: pan-rico
//!     name: Pan Rico
//!     category: panadería
//! ```
//!
//! Every store is validated on load and duplicate IDs are rejected, so a
//! loaded catalog holds the same invariants as one read from Firestore.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use sweet_creations_core::{
    CategoryId, Store, StoreCategory, StoreId, StoreKind, StoreValidationError,
};

use super::{
    CatalogError, CatalogRepository, CatalogWriter, matches_search_term, sort_by_rating_desc,
};

/// Errors loading a fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse fixture: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid store in fixture: {0}")]
    Invalid(#[from] StoreValidationError),

    #[error("Duplicate store id in fixture: {0}")]
    DuplicateStore(StoreId),

    #[error("Duplicate category id in fixture: {0}")]
    DuplicateCategory(CategoryId),
}

/// Contents of a fixture file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFixture {
    #[serde(default)]
    pub categories: Vec<StoreCategory>,
    #[serde(default)]
    pub stores: Vec<Store>,
}

impl CatalogFixture {
    /// Parse and validate fixture text.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError` if the text does not parse or a record is invalid.
    pub fn parse(text: &str) -> Result<Self, FixtureError> {
        let fixture: Self = serde_yaml::from_str(text)?;
        fixture.validate()?;
        Ok(fixture)
    }

    /// Read, parse and validate a fixture file.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError` if the file cannot be read or is invalid.
    pub async fn read(path: &Path) -> Result<Self, FixtureError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| FixtureError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&text)
    }

    /// Check record invariants and ID uniqueness.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), FixtureError> {
        let mut store_ids = HashSet::new();
        for store in &self.stores {
            store.validate()?;
            if !store_ids.insert(&store.id) {
                return Err(FixtureError::DuplicateStore(store.id.clone()));
            }
        }

        let mut category_ids = HashSet::new();
        for category in &self.categories {
            if !category_ids.insert(&category.id) {
                return Err(FixtureError::DuplicateCategory(category.id.clone()));
            }
        }

        Ok(())
    }
}

/// Catalog held in memory.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    data: RwLock<CatalogFixture>,
}

impl InMemoryCatalog {
    /// Build from an already validated fixture.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError` if the fixture violates an invariant.
    pub fn new(fixture: CatalogFixture) -> Result<Self, FixtureError> {
        fixture.validate()?;
        Ok(Self {
            data: RwLock::new(fixture),
        })
    }

    /// Load from a fixture file.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError` if the file cannot be read or is invalid.
    pub async fn load(path: &Path) -> Result<Self, FixtureError> {
        let fixture = CatalogFixture::read(path).await?;
        info!(
            path = %path.display(),
            stores = fixture.stores.len(),
            categories = fixture.categories.len(),
            "Loaded catalog fixture"
        );
        Self::new(fixture)
    }

    /// Copy of the current contents.
    pub async fn snapshot(&self) -> CatalogFixture {
        self.data.read().await.clone()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn list_stores(&self) -> Result<Vec<Store>, CatalogError> {
        Ok(self.data.read().await.stores.clone())
    }

    async fn list_categories(&self) -> Result<Vec<StoreCategory>, CatalogError> {
        Ok(self.data.read().await.categories.clone())
    }

    async fn find_store_by_id(&self, id: &StoreId) -> Result<Option<Store>, CatalogError> {
        Ok(self
            .data
            .read()
            .await
            .stores
            .iter()
            .find(|store| &store.id == id)
            .cloned())
    }

    async fn list_stores_by_category(&self, kind: StoreKind) -> Result<Vec<Store>, CatalogError> {
        let mut stores: Vec<Store> = self
            .data
            .read()
            .await
            .stores
            .iter()
            .filter(|store| store.category == kind)
            .cloned()
            .collect();
        sort_by_rating_desc(&mut stores);
        Ok(stores)
    }

    async fn search_stores_by_term(&self, term: &str) -> Result<Vec<Store>, CatalogError> {
        let term = term.to_lowercase();
        Ok(self
            .data
            .read()
            .await
            .stores
            .iter()
            .filter(|store| matches_search_term(store, &term))
            .cloned()
            .collect())
    }

    async fn list_open_stores(&self) -> Result<Vec<Store>, CatalogError> {
        let mut stores: Vec<Store> = self
            .data
            .read()
            .await
            .stores
            .iter()
            .filter(|store| store.is_open)
            .cloned()
            .collect();
        sort_by_rating_desc(&mut stores);
        Ok(stores)
    }
}

#[async_trait]
impl CatalogWriter for InMemoryCatalog {
    async fn put_store(&self, store: &Store) -> Result<(), CatalogError> {
        store.validate().map_err(FixtureError::from)?;
        let mut data = self.data.write().await;
        match data.stores.iter_mut().find(|s| s.id == store.id) {
            Some(existing) => *existing = store.clone(),
            None => data.stores.push(store.clone()),
        }
        Ok(())
    }

    async fn put_category(&self, category: &StoreCategory) -> Result<(), CatalogError> {
        let mut data = self.data.write().await;
        match data.categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category.clone(),
            None => data.categories.push(category.clone()),
        }
        Ok(())
    }

    async fn delete_store(&self, id: &StoreId) -> Result<(), CatalogError> {
        self.data.write().await.stores.retain(|store| &store.id != id);
        Ok(())
    }
}
