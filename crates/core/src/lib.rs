//! Sweet Creations Core - Catalog types, store filtering and cart logic.
//!
//! This crate is shared by every Sweet Creations component:
//! - `storefront` - JSON storefront service
//! - `cli` - Command-line catalog browsing and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. Presentation code owns the filter and
//! cart values and passes them in on every evaluation.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, store and menu records
//! - [`filter`] - Category and free-text filtering over a store snapshot
//! - [`cart`] - Quantity-keyed cart accumulator and derived totals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod filter;
pub mod types;

pub use cart::{Cart, CartError, CartLine};
pub use filter::{FilterState, filter_stores};
pub use types::*;
