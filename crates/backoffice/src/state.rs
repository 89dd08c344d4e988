//! Application state shared across handlers.

use std::sync::{Arc, PoisonError, RwLock};

use crate::config::BackofficeConfig;
use crate::models::SecuritySettings;
use crate::store::{AuditTrail, UserDirectory};

/// Application state shared across all handlers.
///
/// Cheap to clone: everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: BackofficeConfig,
    directory: UserDirectory,
    audit: AuditTrail,
    security_settings: RwLock<SecuritySettings>,
}

impl AppState {
    /// Build state from configuration, seeding the stores with demo data.
    #[must_use]
    pub fn new(config: BackofficeConfig) -> Self {
        let security_settings = RwLock::new(config.initial_security_settings());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                directory: UserDirectory::seeded(),
                audit: AuditTrail::seeded(),
                security_settings,
            }),
        }
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &BackofficeConfig {
        &self.inner.config
    }

    /// The user directory.
    #[must_use]
    pub fn directory(&self) -> &UserDirectory {
        &self.inner.directory
    }

    /// The audit trail.
    #[must_use]
    pub fn audit(&self) -> &AuditTrail {
        &self.inner.audit
    }

    /// Current security settings.
    #[must_use]
    pub fn security_settings(&self) -> SecuritySettings {
        self.inner
            .security_settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the security settings.
    pub fn set_security_settings(&self, settings: SecuritySettings) {
        *self
            .inner
            .security_settings
            .write()
            .unwrap_or_else(PoisonError::into_inner) = settings;
    }
}
