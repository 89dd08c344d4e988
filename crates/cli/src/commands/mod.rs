//! CLI command implementations.

pub mod passwd;
pub mod users;

use thiserror::Error;

/// Errors that can occur during CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Output serialization failed.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
