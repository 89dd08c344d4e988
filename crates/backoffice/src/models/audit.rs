//! Audit log entry type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tillpoint_core::AuditLogId;

/// An immutable record of a security- or admin-relevant action.
///
/// Entries are append-only and never mutated or deleted; the trail keeps them
/// newest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    /// Monotonically increasing entry ID.
    pub id: AuditLogId,
    /// When the action happened.
    pub timestamp: DateTime<Utc>,
    /// Display name of the acting user, or "Unknown" for failed logins.
    pub actor: String,
    /// Short action name, e.g. "User Login".
    pub action: String,
    /// Human-readable details.
    pub details: String,
    /// Source network address. Placeholder: there is no real client address
    /// in this system.
    pub ip: String,
    /// Module the action belongs to, e.g. "Authentication".
    pub module: String,
}
