//! Cart route handlers.
//!
//! The session holds a single [`ActiveCart`] bound to the store the visitor
//! is browsing. Adding from a different store starts a new cart; leaving the
//! store page discards it. Totals are always recomputed from the current
//! store record, so price changes show up on the next request.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use sweet_creations_core::{Cart, MenuItemId, Price, Store, StoreId};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::{ActiveCart, keys};
use crate::routes::stores::find_store;
use crate::state::AppState;

/// Add-item request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub item_id: String,
}

/// One cart line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub item_id: MenuItemId,
    pub name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    pub subtotal_label: String,
}

/// Cart summary for a store.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub store_id: StoreId,
    pub items: Vec<CartLineView>,
    pub item_count: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub total_label: String,
    /// False while the total is below the store's minimum order.
    pub meets_minimum_order: bool,
}

impl CartView {
    #[must_use]
    pub fn new(store: &Store, cart: &Cart) -> Self {
        let items = cart
            .lines(store)
            .into_iter()
            .map(|line| {
                let subtotal = line.subtotal();
                CartLineView {
                    item_id: line.item.id.clone(),
                    name: line.item.name.clone(),
                    quantity: line.quantity.get(),
                    unit_price: line.item.price,
                    subtotal,
                    subtotal_label: Price::cop(subtotal).display(),
                }
            })
            .collect();

        let total = cart.total(store);
        Self {
            store_id: store.id.clone(),
            items,
            item_count: cart.total_item_count(),
            total: total.amount,
            total_label: total.display(),
            meets_minimum_order: store
                .minimum_order
                .is_none_or(|minimum| total.amount >= minimum),
        }
    }
}

/// The session's cart for `store_id`, empty if it belongs elsewhere.
async fn active_cart(session: &Session, store_id: &StoreId) -> Result<ActiveCart> {
    let current = session.get::<ActiveCart>(keys::ACTIVE_CART).await?;
    Ok(ActiveCart::for_store(current, store_id))
}

/// Show the cart for a store.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<CartView>> {
    let store = find_store(&state, id).await?;
    let active = active_cart(&session, &store.id).await?;
    Ok(Json(CartView::new(&store, &active.cart)))
}

/// Add one unit of a menu item.
///
/// Unavailable items are rejected with 409 and the session cart is left as
/// it was.
#[instrument(skip(state, session, payload))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    payload: std::result::Result<Json<AddItemRequest>, JsonRejection>,
) -> Result<Json<CartView>> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let store = find_store(&state, id).await?;

    let item = store
        .find_menu_item(&request.item_id)
        .ok_or_else(|| AppError::NotFound(format!("menu item {}", request.item_id)))?;

    let active = active_cart(&session, &store.id).await?;
    let cart = active.cart.add_item(item)?;

    session
        .insert(
            keys::ACTIVE_CART,
            ActiveCart {
                store_id: store.id.clone(),
                cart: cart.clone(),
            },
        )
        .await?;

    add_breadcrumb(
        "cart",
        "Added item",
        Some(&[("store_id", store.id.as_str()), ("item_id", item.id.as_str())]),
    );
    tracing::info!(
        store_id = %store.id,
        item_id = %item.id,
        item_count = cart.total_item_count(),
        "Added item to cart"
    );

    Ok(Json(CartView::new(&store, &cart)))
}

/// Leave the store page: discard its cart.
///
/// The cart is the only thing a session holds, so the whole session record
/// is dropped from the store.
#[instrument(skip(session))]
pub async fn clear(session: Session, Path(id): Path<String>) -> Result<StatusCode> {
    let store_id = StoreId::from(id);
    let current = session.get::<ActiveCart>(keys::ACTIVE_CART).await?;

    if current.is_some_and(|active| active.store_id == store_id) {
        session.flush().await?;
        tracing::debug!(store_id = %store_id, "Discarded cart");
    }

    Ok(StatusCode::NO_CONTENT)
}
