//! Session middleware configuration.
//!
//! Visitor sessions are handled by tower-sessions. The store is chosen by the
//! caller: MongoDB in production, `MemoryStore` in tests.

use time::Duration;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer, SessionStore};

use crate::config::Settings;

/// Builds the session layer. Sessions expire after `session_ttl_secs` of
/// inactivity; the cookie carries the same max-age.
pub fn session_layer<S>(settings: &Settings, store: S) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(settings.session_cookie_name.clone())
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            settings.session_ttl_secs,
        )))
        .with_secure(settings.cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
