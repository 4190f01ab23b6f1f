//! Quantity-keyed cart accumulator.
//!
//! A [`Cart`] maps menu item IDs to positive quantities. It only grows:
//! [`Cart::add_item`] returns a new cart with one more unit and leaves the
//! original untouched. There is no remove or decrement.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{MenuItem, MenuItemId, Price, Store};

/// Errors from cart transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The item is not available and can never be added.
    #[error("Invalid operation: menu item {0} is not available")]
    InvalidOperation(MenuItemId),
}

/// Session-scoped selection of menu items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    quantities: BTreeMap<MenuItemId, NonZeroU32>,
}

/// A cart entry resolved against its store's menu.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    pub item: &'a MenuItem,
    pub quantity: NonZeroU32,
}

impl CartLine<'_> {
    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.item.price * Decimal::from(self.quantity.get())
    }
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `item`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidOperation`] if the item is unavailable.
    pub fn add_item(&self, item: &MenuItem) -> Result<Self, CartError> {
        if !item.is_available {
            return Err(CartError::InvalidOperation(item.id.clone()));
        }

        let mut next = self.clone();
        next.quantities
            .entry(item.id.clone())
            .and_modify(|quantity| *quantity = quantity.saturating_add(1))
            .or_insert(NonZeroU32::MIN);
        Ok(next)
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.quantities
            .values()
            .map(|quantity| u64::from(quantity.get()))
            .sum()
    }

    /// Sum of `price * quantity` for every menu item of `store` in the cart.
    ///
    /// Entries with no matching menu item contribute nothing. Zero when the
    /// store has no menu.
    #[must_use]
    pub fn total_price(&self, store: &Store) -> Decimal {
        store
            .menu_items()
            .filter_map(|item| {
                self.quantities
                    .get(&item.id)
                    .map(|quantity| item.price * Decimal::from(quantity.get()))
            })
            .sum()
    }

    /// [`Cart::total_price`] as a formatted price.
    #[must_use]
    pub fn total(&self, store: &Store) -> Price {
        Price::cop(self.total_price(store))
    }

    /// Quantity of `item_id`, zero if absent.
    #[must_use]
    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.quantities.get(item_id).map_or(0, |quantity| quantity.get())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Cart entries resolved against `store`'s menu, in menu order.
    #[must_use]
    pub fn lines<'a>(&self, store: &'a Store) -> Vec<CartLine<'a>> {
        store
            .menu_items()
            .filter_map(|item| {
                self.quantities
                    .get(&item.id)
                    .map(|&quantity| CartLine { item, quantity })
            })
            .collect()
    }
}
