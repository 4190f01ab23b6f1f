//! Core catalog types for Sweet Creations.
//!
//! This module provides type-safe wrappers for the catalog's domain concepts.

pub mod id;
pub mod kind;
pub mod price;
pub mod store;

pub use id::*;
pub use kind::StoreKind;
pub use price::{CurrencyCode, Price};
pub use store::{
    Discount, MAX_RATING, MenuCategory, MenuItem, Store, StoreCategory, StoreValidationError,
};
