//! In-memory stores for the back-office.
//!
//! There is no database: the user directory and audit trail live in memory,
//! are seeded with the demo data on startup, and reset on restart. The store
//! API mirrors a repository layer so the handlers read the same either way.

pub mod audit;
pub mod directory;

use thiserror::Error;

pub use audit::{AuditQuery, AuditTrail};
pub use directory::UserDirectory;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Requested user was not found.
    #[error("user not found")]
    NotFound,

    /// Constraint violation (e.g. duplicate email).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The operation would deactivate, delete, demote, or strip the primary
    /// admin, which normal flows must never do.
    #[error("the primary administrator account cannot be {0}")]
    PrimaryAdminProtected(&'static str),
}
