//! Security settings.

use serde::{Deserialize, Serialize};

/// The security section of system settings.
///
/// `timeout_duration_minutes` drives the session inactivity expiry: the
/// stored value is applied to each session at login, and the session that
/// updates it is adjusted in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySettings {
    /// Whether a second factor is required at login. Display-only in the
    /// demo system.
    pub two_factor_auth: bool,
    /// Whether inactive sessions expire at all.
    pub session_timeout: bool,
    /// Inactivity window in minutes before a session expires.
    pub timeout_duration_minutes: u64,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            two_factor_auth: false,
            session_timeout: true,
            timeout_duration_minutes: 30,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout_is_thirty_minutes() {
        let settings = SecuritySettings::default();
        assert!(settings.session_timeout);
        assert_eq!(settings.timeout_duration_minutes, 30);
    }

    #[test]
    fn test_serde_camel_case() {
        let json = serde_json::to_value(SecuritySettings::default()).unwrap();
        assert_eq!(json["twoFactorAuth"], false);
        assert_eq!(json["timeoutDurationMinutes"], 30);
    }
}
