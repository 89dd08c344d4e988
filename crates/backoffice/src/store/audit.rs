//! Audit trail: append-only, in-memory, newest first.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{NaiveDate, TimeZone, Utc};

use tillpoint_core::AuditLogId;

use crate::models::AuditLogEntry;

/// Placeholder source address recorded on every entry. There is no real
/// client address in this system.
pub const PLACEHOLDER_IP: &str = "192.168.1.1";

struct AuditInner {
    /// Newest entry first.
    entries: Vec<AuditLogEntry>,
    next_id: AuditLogId,
}

/// Filters applied when listing audit entries.
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    /// Exact module name, e.g. "Authentication".
    pub module: Option<String>,
    /// Case-insensitive substring over actor, action, and details.
    pub search: Option<String>,
    /// Calendar day (UTC) the entry was recorded on.
    pub date: Option<NaiveDate>,
}

/// Append-only audit recorder.
///
/// `record` cannot fail: it only prepends to an in-memory list. Entries are
/// never mutated or deleted and are lost on restart, apart from the seed
/// data.
pub struct AuditTrail {
    inner: RwLock<AuditInner>,
}

impl AuditTrail {
    /// Create a trail seeded with a few sample entries.
    #[must_use]
    pub fn seeded() -> Self {
        let entries = seed_entries();
        let next_id = entries
            .iter()
            .map(|e| e.id)
            .max()
            .map_or(AuditLogId::new(1), |id| id.next());

        Self {
            inner: RwLock::new(AuditInner { entries, next_id }),
        }
    }

    /// Create an empty trail.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            inner: RwLock::new(AuditInner {
                entries: Vec::new(),
                next_id: AuditLogId::new(1),
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, AuditInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, AuditInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record an entry, prepending it so the newest is always at index 0.
    pub fn record(&self, actor: &str, action: &str, details: &str, module: &str) -> AuditLogEntry {
        let mut inner = self.write();

        let entry = AuditLogEntry {
            id: inner.next_id,
            timestamp: Utc::now(),
            actor: actor.to_owned(),
            action: action.to_owned(),
            details: details.to_owned(),
            ip: PLACEHOLDER_IP.to_owned(),
            module: module.to_owned(),
        };

        tracing::info!(
            actor,
            action,
            module,
            audit_id = %entry.id,
            "audit event recorded"
        );

        inner.next_id = inner.next_id.next();
        inner.entries.insert(0, entry.clone());
        entry
    }

    /// List entries newest first, applying the query filters.
    #[must_use]
    pub fn list(&self, query: &AuditQuery) -> Vec<AuditLogEntry> {
        let needle = query.search.as_deref().map(str::to_lowercase);

        self.read()
            .entries
            .iter()
            .filter(|entry| {
                query
                    .module
                    .as_deref()
                    .is_none_or(|module| entry.module == module)
            })
            .filter(|entry| {
                needle.as_deref().is_none_or(|needle| {
                    entry.actor.to_lowercase().contains(needle)
                        || entry.action.to_lowercase().contains(needle)
                        || entry.details.to_lowercase().contains(needle)
                })
            })
            .filter(|entry| {
                query
                    .date
                    .is_none_or(|date| entry.timestamp.date_naive() == date)
            })
            .cloned()
            .collect()
    }

    /// Distinct module names, in first-seen (newest-entry) order.
    #[must_use]
    pub fn modules(&self) -> Vec<String> {
        let mut modules: Vec<String> = Vec::new();
        for entry in &self.read().entries {
            if !modules.contains(&entry.module) {
                modules.push(entry.module.clone());
            }
        }
        modules
    }

    /// Total number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    /// Whether the trail is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().entries.is_empty()
    }
}

impl Default for AuditTrail {
    fn default() -> Self {
        Self::seeded()
    }
}

fn seed_entries() -> Vec<AuditLogEntry> {
    let entry = |id: i32, day: u32, hour: u32, min: u32, actor: &str, action: &str, details: &str, module: &str| {
        AuditLogEntry {
            id: AuditLogId::new(id),
            timestamp: Utc
                .with_ymd_and_hms(2023, 4, day, hour, min, 0)
                .single()
                .unwrap_or_else(Utc::now),
            actor: actor.to_owned(),
            action: action.to_owned(),
            details: details.to_owned(),
            ip: PLACEHOLDER_IP.to_owned(),
            module: module.to_owned(),
        }
    };

    // Newest first, matching the storage order.
    vec![
        entry(
            5,
            10,
            16,
            30,
            "Primary Admin",
            "User Login",
            "User logged in successfully",
            "Authentication",
        ),
        entry(
            4,
            10,
            14,
            35,
            "Admin User",
            "Settings Updated",
            "Changed session timeout to 30 minutes",
            "Settings",
        ),
        entry(
            3,
            10,
            14,
            30,
            "Admin User",
            "User Login",
            "User logged in successfully",
            "Authentication",
        ),
        entry(
            2,
            10,
            13,
            20,
            "Staff User",
            "Sale Completed",
            "Processed sale for R 1,250.00",
            "Sales",
        ),
        entry(
            1,
            5,
            9,
            45,
            "Unknown",
            "Failed Login",
            "Failed login attempt for email: john.smith@example.com",
            "Authentication",
        ),
    ]
}
