//! Middleware and extractors for the back-office.

pub mod auth;
pub mod session;

pub use auth::{OptionalUser, RequireAdmin, RequireUser, require_permission};
pub use session::{create_session_layer, expiry_from_settings};
