//! User role type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Role of a back-office user.
///
/// There is no hierarchy beyond this pair: admins reach the management pages,
/// staff get the till. The distinguished primary admin is a flag on the user
/// record, not a third role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full back-office access, subject to explicit permissions.
    Admin,
    /// Point-of-sale access only.
    #[default]
    Staff,
}

impl UserRole {
    /// Returns `true` for [`UserRole::Admin`].
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Staff => write!(f, "staff"),
        }
    }
}
