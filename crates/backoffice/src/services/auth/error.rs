//! Authentication error types.

use thiserror::Error;

use crate::store::DirectoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] tillpoint_core::EmailError),

    /// Email/password pair does not match the credential table.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The re-entered admin password did not match.
    #[error("admin password is incorrect")]
    AdminPasswordIncorrect,

    /// New password fails the minimum requirements.
    #[error("password must be at least {min} characters")]
    WeakPassword {
        /// Minimum accepted length.
        min: usize,
    },

    /// Underlying store error.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
