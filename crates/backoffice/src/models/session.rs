//! Session-related constants.
//!
//! The session stores the full serialized [`super::User`] as the current-user
//! snapshot. Last-activity tracking is handled by the session layer's
//! inactivity expiry, not by an explicit key.

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in user snapshot.
    pub const CURRENT_USER: &str = "current_user";
}
