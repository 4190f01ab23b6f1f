//! Session-related types.

use serde::{Deserialize, Serialize};

use sweet_creations_core::{Cart, StoreId};

/// The cart of the store page the visitor is currently on.
///
/// Only one cart exists per session. It belongs to `store_id`; opening a
/// different store replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveCart {
    pub store_id: StoreId,
    pub cart: Cart,
}

impl ActiveCart {
    /// An empty cart for `store_id`.
    #[must_use]
    pub fn empty(store_id: StoreId) -> Self {
        Self {
            store_id,
            cart: Cart::new(),
        }
    }

    /// The cart if it belongs to `store_id`, otherwise a fresh one.
    #[must_use]
    pub fn for_store(current: Option<Self>, store_id: &StoreId) -> Self {
        current
            .filter(|active| &active.store_id == store_id)
            .unwrap_or_else(|| Self::empty(store_id.clone()))
    }
}

/// Session keys.
pub mod keys {
    /// Key for the active store cart.
    pub const ACTIVE_CART: &str = "active_cart";
}
