//! Back-office configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults run the demo system as-is.
//!
//! - `TILLPOINT_HOST` - Bind address (default: 127.0.0.1)
//! - `TILLPOINT_PORT` - Listen port (default: 3000)
//! - `TILLPOINT_SESSION_TIMEOUT` - Whether inactive sessions expire
//!   (default: true)
//! - `TILLPOINT_SESSION_TIMEOUT_MINUTES` - Inactivity window in minutes
//!   (default: 30, must be positive)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

use crate::models::SecuritySettings;

/// Default inactivity window in minutes.
const DEFAULT_SESSION_TIMEOUT_MINUTES: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Back-office application configuration.
#[derive(Debug, Clone)]
pub struct BackofficeConfig {
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Whether inactive sessions expire at all.
    pub session_timeout: bool,
    /// Inactivity window in minutes before a session expires.
    pub session_timeout_minutes: u64,
}

impl BackofficeConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable, or if
    /// the timeout is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("TILLPOINT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("TILLPOINT_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("TILLPOINT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("TILLPOINT_PORT".to_owned(), e.to_string()))?;
        let session_timeout = get_env_or_default("TILLPOINT_SESSION_TIMEOUT", "true")
            .parse::<bool>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("TILLPOINT_SESSION_TIMEOUT".to_owned(), e.to_string())
            })?;
        let session_timeout_minutes = get_env_or_default(
            "TILLPOINT_SESSION_TIMEOUT_MINUTES",
            &DEFAULT_SESSION_TIMEOUT_MINUTES.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar(
                "TILLPOINT_SESSION_TIMEOUT_MINUTES".to_owned(),
                e.to_string(),
            )
        })?;

        if session_timeout_minutes == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "TILLPOINT_SESSION_TIMEOUT_MINUTES".to_owned(),
                "must be positive".to_owned(),
            ));
        }

        Ok(Self {
            host,
            port,
            session_timeout,
            session_timeout_minutes,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Initial security settings derived from configuration.
    #[must_use]
    pub const fn initial_security_settings(&self) -> SecuritySettings {
        SecuritySettings {
            two_factor_auth: false,
            session_timeout: self.session_timeout,
            timeout_duration_minutes: self.session_timeout_minutes,
        }
    }
}

impl Default for BackofficeConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            session_timeout: true,
            session_timeout_minutes: DEFAULT_SESSION_TIMEOUT_MINUTES,
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = BackofficeConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            session_timeout: true,
            session_timeout_minutes: 30,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_default_timeout_is_thirty_minutes() {
        let config = BackofficeConfig::default();
        assert!(config.session_timeout);
        assert_eq!(config.session_timeout_minutes, 30);
    }

    #[test]
    fn test_initial_security_settings() {
        let config = BackofficeConfig {
            session_timeout_minutes: 15,
            ..BackofficeConfig::default()
        };
        let settings = config.initial_security_settings();
        assert_eq!(settings.timeout_duration_minutes, 15);
        assert!(!settings.two_factor_auth);
    }
}
