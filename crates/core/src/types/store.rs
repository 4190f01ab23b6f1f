//! Catalog records: stores, their menus, and the category catalog.
//!
//! Field names serialize in camelCase to match the documents kept in the
//! `stores` and `storeCategories` collections. Descriptive fields that older
//! documents may lack default to empty values; identity fields (`id`,
//! `name`, `category`) are required.

use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::{CategoryId, MenuCategoryId, MenuItemId, StoreId};
use super::kind::StoreKind;
use super::price::Price;

/// Highest rating a store can carry.
pub const MAX_RATING: f64 = 5.0;

/// A bakery, pastry shop or café listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Cover image URL.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: f64,
    /// Human readable delivery estimate (e.g., "25-35 min").
    #[serde(default)]
    pub delivery_time: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub delivery_fee: Decimal,
    pub category: StoreKind,
    #[serde(default)]
    pub is_open: bool,
    /// Human readable distance (e.g., "1.2 km").
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub minimum_order: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<Vec<MenuCategory>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Day name to opening hours text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_reviews: Option<u32>,
}

/// A tab of a store's menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    pub id: MenuCategoryId,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// A purchasable item on a store's menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    /// Name of the menu tab the item belongs to.
    #[serde(default)]
    pub category: String,
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergens: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_popular: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,
}

/// Promotional discount shown next to a menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub percentage: u8,
    #[serde(with = "rust_decimal::serde::float")]
    pub original_price: Decimal,
}

/// An entry of the category catalog shown as filter chips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreCategory {
    pub id: CategoryId,
    /// Display name (e.g., "Reposterías").
    pub name: String,
    /// Icon glyph (usually an emoji).
    #[serde(default)]
    pub icon: String,
}

/// Why a store record failed schema checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreValidationError {
    #[error("store id is empty")]
    EmptyId,
    #[error("store {0} has an empty name")]
    EmptyName(StoreId),
    #[error("store {id} has rating {rating} outside 0..=5")]
    RatingOutOfRange { id: StoreId, rating: String },
    #[error("store {id} has a negative {field}")]
    NegativeAmount { id: StoreId, field: &'static str },
    #[error("store {id} has a menu item with an empty id")]
    EmptyMenuItemId { id: StoreId },
    #[error("menu item {item} in store {id} has a negative price")]
    NegativePrice { id: StoreId, item: MenuItemId },
    #[error("menu item {item} appears more than once in store {id}")]
    DuplicateMenuItem { id: StoreId, item: MenuItemId },
}

impl Store {
    /// Check the invariants every catalog record must hold.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), StoreValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(StoreValidationError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(StoreValidationError::EmptyName(self.id.clone()));
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(StoreValidationError::RatingOutOfRange {
                id: self.id.clone(),
                rating: self.rating.to_string(),
            });
        }
        if self.delivery_fee.is_sign_negative() && !self.delivery_fee.is_zero() {
            return Err(StoreValidationError::NegativeAmount {
                id: self.id.clone(),
                field: "deliveryFee",
            });
        }
        if self
            .minimum_order
            .is_some_and(|min| min.is_sign_negative() && !min.is_zero())
        {
            return Err(StoreValidationError::NegativeAmount {
                id: self.id.clone(),
                field: "minimumOrder",
            });
        }

        let mut seen = HashSet::new();
        for item in self.menu_items() {
            if item.id.as_str().trim().is_empty() {
                return Err(StoreValidationError::EmptyMenuItemId {
                    id: self.id.clone(),
                });
            }
            if item.price.is_sign_negative() && !item.price.is_zero() {
                return Err(StoreValidationError::NegativePrice {
                    id: self.id.clone(),
                    item: item.id.clone(),
                });
            }
            if !seen.insert(item.id.as_str()) {
                return Err(StoreValidationError::DuplicateMenuItem {
                    id: self.id.clone(),
                    item: item.id.clone(),
                });
            }
        }

        Ok(())
    }

    /// Iterate every item across every menu category, in menu order.
    pub fn menu_items(&self) -> impl Iterator<Item = &MenuItem> {
        self.menu
            .iter()
            .flatten()
            .flat_map(|category| category.items.iter())
    }

    /// Find a menu item by ID.
    #[must_use]
    pub fn find_menu_item(&self, id: &str) -> Option<&MenuItem> {
        self.menu_items().find(|item| item.id.as_str() == id)
    }

    /// Find a menu category by ID.
    #[must_use]
    pub fn menu_category(&self, id: &str) -> Option<&MenuCategory> {
        self.menu
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|category| category.id.as_str() == id)
    }

    /// Whether the store has at least one menu category.
    #[must_use]
    pub fn has_menu(&self) -> bool {
        self.menu.as_ref().is_some_and(|menu| !menu.is_empty())
    }

    #[must_use]
    pub const fn delivery_fee_price(&self) -> Price {
        Price::cop(self.delivery_fee)
    }

    /// Delivery fee as shown on store cards: "Gratis" when free.
    #[must_use]
    pub fn delivery_fee_label(&self) -> String {
        let fee = self.delivery_fee_price();
        if fee.is_zero() {
            "Gratis".to_string()
        } else {
            fee.display()
        }
    }

    #[must_use]
    pub fn minimum_order_price(&self) -> Option<Price> {
        self.minimum_order.map(Price::cop)
    }
}

impl MenuItem {
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::cop(self.price)
    }
}
