//! Read-only catalog commands.
//!
//! The catalog comes from the same source the storefront would use:
//! `CATALOG_FIXTURE_PATH` if set, Firestore otherwise.

use std::sync::Arc;

use tracing::info;

use sweet_creations_core::{CategoryId, FilterState, Store, StoreId, filter_stores};
use sweet_creations_storefront::catalog::{self, CatalogRepository};
use sweet_creations_storefront::config::CatalogSource;

async fn open_catalog() -> Result<Arc<dyn CatalogRepository>, Box<dyn std::error::Error>> {
    let source = CatalogSource::from_env()?;
    Ok(catalog::connect(&source).await?)
}

/// Print the filtered store listing.
///
/// # Errors
///
/// Returns an error if configuration is missing or the catalog fails.
pub async fn stores(
    category: Option<String>,
    query: String,
    open: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository = open_catalog().await?;

    let (stores, categories) = if open {
        tokio::try_join!(repository.list_open_stores(), repository.list_categories())?
    } else {
        tokio::try_join!(repository.list_stores(), repository.list_categories())?
    };

    let filter = FilterState::new(category.map_or_else(CategoryId::all, CategoryId::new), query);
    let visible = filter_stores(&stores, &categories, &filter);

    info!("{} of {} stores", visible.len(), stores.len());
    for store in visible {
        info!("{}", store_line(store));
    }

    Ok(())
}

/// Print one store and its menu.
///
/// # Errors
///
/// Returns an error if the store does not exist or the catalog fails.
pub async fn store(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let repository = open_catalog().await?;
    let store = repository
        .find_store_by_id(&StoreId::new(id))
        .await?
        .ok_or_else(|| format!("Store not found: {id}"))?;

    for line in store_detail(&store) {
        info!("{line}");
    }

    Ok(())
}

/// Print the category catalog.
///
/// # Errors
///
/// Returns an error if the catalog fails.
pub async fn categories() -> Result<(), Box<dyn std::error::Error>> {
    let repository = open_catalog().await?;
    for category in repository.list_categories().await? {
        info!("{:>4}  {} {}", category.id.as_str(), category.icon, category.name);
    }
    Ok(())
}

/// One-line store card.
fn store_line(store: &Store) -> String {
    format!(
        "{:<20} {:<24} {:<11} ★ {:.1}  {}  envío {}{}",
        store.id.as_str(),
        store.name,
        store.category.as_str(),
        store.rating,
        store.delivery_time,
        store.delivery_fee_label(),
        if store.is_open { "" } else { "  (cerrado)" }
    )
}

/// Store header followed by its menu, one entry per line.
fn store_detail(store: &Store) -> Vec<String> {
    let mut lines = vec![
        format!("{} ({})", store.name, store.category),
        store.description.clone(),
        format!(
            "★ {:.1}  {}  {}  envío {}",
            store.rating,
            store.delivery_time,
            store.distance,
            store.delivery_fee_label()
        ),
    ];

    if let Some(minimum) = store.minimum_order_price() {
        lines.push(format!("Pedido mínimo {minimum}"));
    }

    if !store.has_menu() {
        lines.push("Sin menú".to_string());
        return lines;
    }

    for category in store.menu.iter().flatten() {
        lines.push(format!("{} {}", category.icon, category.name));
        for item in &category.items {
            lines.push(format!(
                "  {:<20} {:<28} {:>10}{}",
                item.id.as_str(),
                item.name,
                item.unit_price().display(),
                if item.is_available { "" } else { "  (agotado)" }
            ));
        }
    }

    lines
}
