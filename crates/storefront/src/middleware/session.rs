//! Session middleware configuration.
//!
//! Sessions live in memory: a cart is discarded when the visitor leaves the
//! store page, so nothing in a session needs to outlive the process. The
//! store evicts expired sessions and caps how many it holds.

use tower_sessions::{Expiry, SessionManagerLayer, cookie::SameSite};

use super::session_store::CacheSessionStore;
use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "sc_session";

/// Session expiry after inactivity, in seconds (30 minutes).
const SESSION_EXPIRY_SECONDS: i64 = 30 * 60;

/// Create the session layer with an evicting in-memory store.
#[must_use]
pub fn create_session_layer(
    config: &StorefrontConfig,
) -> SessionManagerLayer<CacheSessionStore> {
    SessionManagerLayer::new(CacheSessionStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
