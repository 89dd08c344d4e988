//! Permission names and groupings.
//!
//! The permission set is closed: the back-office has exactly ten named
//! capabilities, and per-user grants are lists of these values. The primary
//! admin bypasses the list entirely (see the evaluator in the backoffice
//! crate).

use core::fmt;

use serde::{Deserialize, Serialize};

/// A named capability a user may be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Create, edit, verify, promote, and delete users.
    ManageUsers,
    /// Maintain the product catalog and stock levels.
    ManageInventory,
    /// Operate the till and record sales.
    ManageSales,
    /// Maintain customer records.
    ManageCustomers,
    /// Work support tickets.
    ManageTickets,
    /// View the reporting dashboards.
    ViewReports,
    /// Change system settings.
    ManageSettings,
    /// Issue refunds at the till.
    ProcessRefunds,
    /// Read the audit log.
    ViewAuditLogs,
    /// Trigger and restore backups.
    ManageBackups,
}

impl Permission {
    /// Every permission, in display order.
    pub const ALL: [Self; 10] = [
        Self::ManageUsers,
        Self::ManageInventory,
        Self::ManageSales,
        Self::ManageCustomers,
        Self::ManageTickets,
        Self::ViewReports,
        Self::ManageSettings,
        Self::ProcessRefunds,
        Self::ViewAuditLogs,
        Self::ManageBackups,
    ];

    /// The wire name of this permission (`snake_case`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ManageUsers => "manage_users",
            Self::ManageInventory => "manage_inventory",
            Self::ManageSales => "manage_sales",
            Self::ManageCustomers => "manage_customers",
            Self::ManageTickets => "manage_tickets",
            Self::ViewReports => "view_reports",
            Self::ManageSettings => "manage_settings",
            Self::ProcessRefunds => "process_refunds",
            Self::ViewAuditLogs => "view_audit_logs",
            Self::ManageBackups => "manage_backups",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a string is not a known permission name.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown permission: {0}")]
pub struct PermissionParseError(pub String);

impl std::str::FromStr for Permission {
    type Err = PermissionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| PermissionParseError(s.to_owned()))
    }
}

/// A named group of permissions, as presented on the permissions matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionGroup {
    /// Display name of the group.
    pub name: String,
    /// Permissions belonging to the group.
    pub permissions: Vec<Permission>,
}

/// The canonical grouping of the ten permissions.
#[must_use]
pub fn permission_groups() -> Vec<PermissionGroup> {
    vec![
        PermissionGroup {
            name: "Administration".to_owned(),
            permissions: vec![Permission::ManageUsers, Permission::ManageSettings],
        },
        PermissionGroup {
            name: "Store Operations".to_owned(),
            permissions: vec![
                Permission::ManageInventory,
                Permission::ManageSales,
                Permission::ProcessRefunds,
            ],
        },
        PermissionGroup {
            name: "Customer Service".to_owned(),
            permissions: vec![Permission::ManageCustomers, Permission::ManageTickets],
        },
        PermissionGroup {
            name: "Reporting & System".to_owned(),
            permissions: vec![
                Permission::ViewReports,
                Permission::ViewAuditLogs,
                Permission::ManageBackups,
            ],
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&Permission::ViewAuditLogs).unwrap(),
            "\"view_audit_logs\""
        );
        let p: Permission = serde_json::from_str("\"manage_users\"").unwrap();
        assert_eq!(p, Permission::ManageUsers);
    }

    #[test]
    fn test_from_str_roundtrip() {
        for p in Permission::ALL {
            let parsed: Permission = p.as_str().parse().unwrap();
            assert_eq!(parsed, p);
        }
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "manage_everything".parse::<Permission>().unwrap_err();
        assert!(err.to_string().contains("manage_everything"));
    }

    #[test]
    fn test_groups_cover_all_permissions_once() {
        let mut seen: Vec<Permission> = permission_groups()
            .into_iter()
            .flat_map(|g| g.permissions)
            .collect();
        seen.sort_by_key(|p| p.as_str());
        let mut expected = Permission::ALL.to_vec();
        expected.sort_by_key(|p| p.as_str());
        assert_eq!(seen, expected);
    }
}
