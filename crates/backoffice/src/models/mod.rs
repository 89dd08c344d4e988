//! Domain models for the back-office.

pub mod audit;
pub mod session;
pub mod settings;
pub mod user;

pub use audit::AuditLogEntry;
pub use session::session_keys;
pub use settings::SecuritySettings;
pub use user::{User, UserPatch};
