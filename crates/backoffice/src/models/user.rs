//! User domain type.
//!
//! The serialized form (camelCase) doubles as the session snapshot, so the
//! JSON shape matches what the pages consume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tillpoint_core::{Email, Permission, UserId, UserRole, UserStatus};

/// A back-office user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address, also the login identifier.
    pub email: Email,
    /// Role (admin or staff).
    pub role: UserRole,
    /// Active/inactive account status.
    pub status: UserStatus,
    /// Whether an admin has verified this account.
    pub verified: bool,
    /// Distinguished flag: implicit all-permissions, immune to
    /// deactivation, deletion, demotion, and permission revocation.
    pub is_primary_admin: bool,
    /// Whether the user has replaced their initial password.
    pub password_changed: bool,
    /// Last successful login, if any.
    pub last_login: Option<DateTime<Utc>>,
    /// Explicitly granted permissions. Ignored for the primary admin.
    pub permissions: Vec<Permission>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether the user holds the given permission explicitly.
    ///
    /// The primary-admin short-circuit lives in the evaluator
    /// ([`crate::permissions::has_permission`]); this only checks the list.
    #[must_use]
    pub fn has_explicit_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

/// Partial update applied to a user record.
///
/// Merge semantics: `None` fields are left untouched, so a profile edit only
/// sends what changed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<Email>,
}

impl UserPatch {
    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId::new(3),
            name: "Staff User".to_owned(),
            email: Email::parse("staff@example.com").unwrap(),
            role: UserRole::Staff,
            status: UserStatus::Active,
            verified: true,
            is_primary_admin: false,
            password_changed: false,
            last_login: None,
            permissions: vec![Permission::ManageSales],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_serde_camel_case_snapshot_shape() {
        let user = sample_user();
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["isPrimaryAdmin"], false);
        assert_eq!(json["passwordChanged"], false);
        assert_eq!(json["lastLogin"], serde_json::Value::Null);
        assert_eq!(json["permissions"][0], "manage_sales");
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let user = sample_user();
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, user.id);
        assert_eq!(back.email, user.email);
        assert_eq!(back.permissions, user.permissions);
    }

    #[test]
    fn test_has_explicit_permission() {
        let user = sample_user();
        assert!(user.has_explicit_permission(Permission::ManageSales));
        assert!(!user.has_explicit_permission(Permission::ManageUsers));
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(UserPatch::default().is_empty());
        let patch = UserPatch {
            name: Some("New Name".to_owned()),
            email: None,
        };
        assert!(!patch.is_empty());
    }
}
