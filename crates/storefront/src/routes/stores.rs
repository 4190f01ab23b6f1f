//! Store listing and detail handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use sweet_creations_core::{CategoryId, FilterState, Store, StoreId, StoreKind, filter_stores};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Selected category ID; absent means "all".
    pub category: Option<String>,
    /// Free-text search.
    #[serde(default)]
    pub q: String,
}

impl ListQuery {
    fn filter_state(&self) -> FilterState {
        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map_or_else(CategoryId::all, CategoryId::new);
        FilterState::new(category, self.q.clone())
    }
}

/// Store card shown in the listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    pub id: StoreId,
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: StoreKind,
    pub rating: f64,
    pub delivery_time: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub delivery_fee: Decimal,
    pub delivery_fee_label: String,
    pub distance: String,
    pub is_open: bool,
    pub specialties: Vec<String>,
}

impl From<&Store> for StoreSummary {
    fn from(store: &Store) -> Self {
        Self {
            id: store.id.clone(),
            name: store.name.clone(),
            description: store.description.clone(),
            image: store.image.clone(),
            category: store.category,
            rating: store.rating,
            delivery_time: store.delivery_time.clone(),
            delivery_fee: store.delivery_fee,
            delivery_fee_label: store.delivery_fee_label(),
            distance: store.distance.clone(),
            is_open: store.is_open,
            specialties: store.specialties.clone(),
        }
    }
}

/// Filtered listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreListResponse {
    pub selected_category: CategoryId,
    pub query: String,
    pub total: usize,
    pub stores: Vec<StoreSummary>,
}

/// Store detail: the full record plus display labels.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDetail {
    #[serde(flatten)]
    pub store: Store,
    pub delivery_fee_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_order_label: Option<String>,
}

impl From<Store> for StoreDetail {
    fn from(store: Store) -> Self {
        Self {
            delivery_fee_label: store.delivery_fee_label(),
            minimum_order_label: store.minimum_order_price().map(|price| price.display()),
            store,
        }
    }
}

/// List stores narrowed by category and search text.
///
/// Both the stores and the category catalog are fetched fresh; the category
/// catalog resolves the selected ID to a display name.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<StoreListResponse>> {
    let catalog = state.catalog();
    let (stores, categories) = tokio::try_join!(catalog.list_stores(), catalog.list_categories())?;

    let filter = params.filter_state();
    let visible: Vec<StoreSummary> = filter_stores(&stores, &categories, &filter)
        .into_iter()
        .map(StoreSummary::from)
        .collect();

    tracing::debug!(
        category = %filter.selected_category,
        shown = visible.len(),
        of = stores.len(),
        "Filtered store listing"
    );

    Ok(Json(StoreListResponse {
        selected_category: filter.selected_category.clone(),
        query: filter.trimmed_query().to_string(),
        total: visible.len(),
        stores: visible,
    }))
}

/// Store detail with menu.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoreDetail>> {
    let store = find_store(&state, id).await?;
    Ok(Json(StoreDetail::from(store)))
}

/// Load a store or fail with 404.
pub(crate) async fn find_store(state: &AppState, id: String) -> Result<Store> {
    let id = StoreId::from(id);
    state
        .catalog()
        .find_store_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("store {id}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::http::StatusCode;

    use sweet_creations_core::StoreCategory;

    use super::*;
    use crate::catalog::{CatalogError, CatalogRepository};
    use crate::routes::test_support::{app, app_with, get, send};

    fn ids(body: &serde_json::Value) -> Vec<String> {
        body["stores"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_lists_all_stores_in_catalog_order() {
        let (status, _, body) = send(&app(), get("/api/stores", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec!["pan-rico", "dulce-aroma"]);
        assert_eq!(body["selectedCategory"], "1");
        assert_eq!(body["stores"][0]["deliveryFeeLabel"], "Gratis");
        assert_eq!(body["stores"][1]["deliveryFeeLabel"], "$ 3.000");
    }

    #[tokio::test]
    async fn test_filters_by_category_display_name() {
        let (_, _, body) = send(&app(), get("/api/stores?category=2", None)).await;
        assert_eq!(ids(&body), vec!["pan-rico"]);

        let (_, _, body) = send(&app(), get("/api/stores?category=3", None)).await;
        assert_eq!(ids(&body), vec!["dulce-aroma"]);
    }

    #[tokio::test]
    async fn test_unknown_category_shows_everything() {
        let (status, _, body) = send(&app(), get("/api/stores?category=99", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
    }

    #[tokio::test]
    async fn test_filters_by_query() {
        let (_, _, body) = send(&app(), get("/api/stores?q=%20CUPCAKES%20", None)).await;
        assert_eq!(ids(&body), vec!["dulce-aroma"]);
        assert_eq!(body["query"], "CUPCAKES");

        let (_, _, body) = send(&app(), get("/api/stores?category=2&q=torta", None)).await;
        assert_eq!(body["total"], 0);
    }

    #[tokio::test]
    async fn test_show_store() {
        let (status, _, body) = send(&app(), get("/api/stores/dulce-aroma", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Dulce Aroma");
        assert_eq!(body["minimumOrderLabel"], "$ 15.000");
        assert_eq!(body["menu"][0]["items"][0]["id"], "t1");
    }

    #[tokio::test]
    async fn test_show_unknown_store() {
        let (status, _, body) = send(&app(), get("/api/stores/nope", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found: store nope");
    }

    struct Unreachable;

    #[async_trait]
    impl CatalogRepository for Unreachable {
        async fn list_stores(&self) -> std::result::Result<Vec<Store>, CatalogError> {
            Err(CatalogError::Status {
                status: 503,
                message: "unavailable".to_string(),
            })
        }

        async fn list_categories(&self) -> std::result::Result<Vec<StoreCategory>, CatalogError> {
            Ok(Vec::new())
        }

        async fn find_store_by_id(
            &self,
            _id: &StoreId,
        ) -> std::result::Result<Option<Store>, CatalogError> {
            self.list_stores().await.map(|_| None)
        }

        async fn list_stores_by_category(
            &self,
            _kind: StoreKind,
        ) -> std::result::Result<Vec<Store>, CatalogError> {
            self.list_stores().await
        }

        async fn search_stores_by_term(
            &self,
            _term: &str,
        ) -> std::result::Result<Vec<Store>, CatalogError> {
            self.list_stores().await
        }

        async fn list_open_stores(&self) -> std::result::Result<Vec<Store>, CatalogError> {
            self.list_stores().await
        }
    }

    #[tokio::test]
    async fn test_repository_failure_is_bad_gateway() {
        let app = app_with(Arc::new(Unreachable));
        let (status, _, body) = send(&app, get("/api/stores", None)).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Catalog unavailable");
    }
}
