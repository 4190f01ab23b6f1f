//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                       - Liveness
//! GET    /health/ready                 - Catalog reachable
//!
//! # Catalog
//! GET    /api/categories               - Category catalog
//! GET    /api/stores?category=&q=      - Filtered store listing
//! GET    /api/stores/{id}              - Store detail with menu
//!
//! # Cart (one per session, bound to a store)
//! GET    /api/stores/{id}/cart         - Cart summary
//! POST   /api/stores/{id}/cart/items   - Add one unit of {"itemId"}
//! DELETE /api/stores/{id}/cart         - Leave the store, discard the cart
//! ```

pub mod cart;
pub mod categories;
pub mod stores;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(categories::index))
        .route("/api/stores", get(stores::index))
        .route("/api/stores/{id}", get(stores::show))
        .route("/api/stores/{id}/cart", get(cart::show).delete(cart::clear))
        .route("/api/stores/{id}/cart/items", post(cart::add))
}
