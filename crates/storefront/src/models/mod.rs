//! Session-scoped models for storefront.

pub mod session;

pub use session::{ActiveCart, keys};
