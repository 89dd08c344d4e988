//! Session middleware configuration.
//!
//! Sets up in-memory cookie sessions using tower-sessions. The inactivity
//! window is configurable and enforced server-side; a client cannot extend
//! its own session by editing local state.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::BackofficeConfig;
use crate::models::SecuritySettings;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "tillpoint_session";

/// Translate security settings into a session expiry.
///
/// When `session_timeout` is disabled, sessions last until the browser
/// closes instead of expiring on inactivity.
#[must_use]
pub fn expiry_from_settings(settings: &SecuritySettings) -> Expiry {
    if settings.session_timeout {
        #[allow(clippy::cast_possible_wrap)] // Minutes are bounded by validation
        let minutes = settings.timeout_duration_minutes as i64;
        Expiry::OnInactivity(tower_sessions::cookie::time::Duration::minutes(minutes))
    } else {
        Expiry::OnSessionEnd
    }
}

/// Create the session layer with an in-memory store.
///
/// The layer's expiry is only the default for sessions that never log in:
/// the login handler re-applies the expiry from the stored security
/// settings, so timeout updates reach new sessions without a restart.
#[must_use]
pub fn create_session_layer(config: &BackofficeConfig) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(expiry_from_settings(&config.initial_security_settings()))
        // No TLS termination in the demo deployment
        .with_secure(false)
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}
