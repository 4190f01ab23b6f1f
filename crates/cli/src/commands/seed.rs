//! Fixture validation and Firestore seeding.

use std::path::Path;

use tracing::{info, warn};

use sweet_creations_storefront::catalog::{
    CatalogError, CatalogFixture, CatalogWriter, FirestoreCatalog,
};
use sweet_creations_storefront::config::CatalogSource;

/// Outcome of a seeding run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub stores: usize,
}

/// Validate a fixture file without touching the network.
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not parse, or holds an
/// invalid record.
pub async fn validate(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let fixture = CatalogFixture::read(path).await?;

    let without_menu = fixture.stores.iter().filter(|s| !s.has_menu()).count();
    if without_menu > 0 {
        warn!(count = without_menu, "Stores without a menu cannot take orders");
    }

    info!(
        path = %path.display(),
        categories = fixture.categories.len(),
        stores = fixture.stores.len(),
        "Fixture is valid"
    );
    Ok(())
}

/// Upsert a fixture into Firestore.
///
/// # Errors
///
/// Returns an error if Firestore is not configured, the fixture is invalid,
/// or a write fails.
pub async fn seed(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let CatalogSource::Firestore(config) = CatalogSource::from_env()? else {
        return Err("seed writes to Firestore; unset CATALOG_FIXTURE_PATH".into());
    };

    // Validate before the first write
    let fixture = CatalogFixture::read(path).await?;
    info!(project = %config.project_id, "Seeding Firestore");

    let writer = FirestoreCatalog::new(&config);
    let report = seed_catalog(&writer, &fixture).await?;

    info!("Seeding complete!");
    info!("  Categories written: {}", report.categories);
    info!("  Stores written: {}", report.stores);
    Ok(())
}

/// Write every category, then every store. Stops at the first failure.
///
/// # Errors
///
/// Returns the first write error.
pub async fn seed_catalog(
    writer: &dyn CatalogWriter,
    fixture: &CatalogFixture,
) -> Result<SeedReport, CatalogError> {
    let mut report = SeedReport::default();

    for category in &fixture.categories {
        writer.put_category(category).await?;
        report.categories += 1;
    }

    for store in &fixture.stores {
        writer.put_store(store).await?;
        info!(store_id = %store.id, "Wrote store");
        report.stores += 1;
    }

    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sweet_creations_storefront::catalog::{CatalogRepository, InMemoryCatalog};

    const FIXTURE: &str = r#"
categories:
  - { id: "1", name: Todas }
  - { id: "2", name: Cafetería }
stores:
  - { id: cafe-central, name: Café Central, category: cafetería, rating: 4.4 }
  - { id: pan-rico, name: Pan Rico, category: panadería }
"#;

    #[tokio::test]
    async fn test_seed_catalog_writes_everything() {
        let fixture = CatalogFixture::parse(FIXTURE).unwrap();
        let target = InMemoryCatalog::default();

        let report = seed_catalog(&target, &fixture).await.unwrap();

        assert_eq!(
            report,
            SeedReport {
                categories: 2,
                stores: 2
            }
        );
        assert_eq!(target.snapshot().await, fixture);
    }

    #[tokio::test]
    async fn test_seed_catalog_is_idempotent() {
        let fixture = CatalogFixture::parse(FIXTURE).unwrap();
        let target = InMemoryCatalog::default();

        seed_catalog(&target, &fixture).await.unwrap();
        seed_catalog(&target, &fixture).await.unwrap();

        assert_eq!(target.list_stores().await.unwrap().len(), 2);
        assert_eq!(target.list_categories().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_validate_sample_fixture() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../storefront/fixtures/catalog.yaml");
        assert!(validate(&path).await.is_ok());
    }
}
