//! User directory: the in-memory user list plus the demo credential table.
//!
//! Seeded from the fixed demo data. Only the three long-standing accounts
//! have credentials; the other seed users exist to exercise the verification
//! and activation flows.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{TimeZone, Utc};

use tillpoint_core::{Email, Permission, UserId, UserRole, UserStatus};

use super::DirectoryError;
use crate::models::{User, UserPatch};
use crate::services::auth::password::{encode_password, generate_password, verify_password};

/// Length of generated temporary passwords.
const TEMP_PASSWORD_LENGTH: usize = 10;

struct DirectoryInner {
    users: Vec<User>,
    /// Email -> encoded password. Accounts without an entry cannot log in.
    credentials: HashMap<String, String>,
    next_id: UserId,
}

/// In-memory user directory with interior mutability.
///
/// All mutations enforce the primary-admin protections: that account cannot
/// be deleted, deactivated, demoted, or have permissions revoked.
pub struct UserDirectory {
    inner: RwLock<DirectoryInner>,
}

impl UserDirectory {
    /// Create a directory seeded with the demo users and credentials.
    #[must_use]
    pub fn seeded() -> Self {
        let users = seed_users();
        let credentials = seed_credentials();
        let next_id = users
            .iter()
            .map(|u| u.id)
            .max()
            .map_or(UserId::new(1), |id| id.next());

        Self {
            inner: RwLock::new(DirectoryInner {
                users,
                credentials,
                next_id,
            }),
        }
    }

    // A poisoned lock only means another thread panicked mid-operation; the
    // directory data itself is still usable.
    fn read(&self) -> RwLockReadGuard<'_, DirectoryInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, DirectoryInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// List all users, in seed/creation order.
    #[must_use]
    pub fn list(&self) -> Vec<User> {
        self.read().users.clone()
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::NotFound` if no user has the ID.
    pub fn get(&self, id: UserId) -> Result<User, DirectoryError> {
        self.read()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(DirectoryError::NotFound)
    }

    /// Get a user by email address.
    #[must_use]
    pub fn get_by_email(&self, email: &Email) -> Option<User> {
        self.read()
            .users
            .iter()
            .find(|u| &u.email == email)
            .cloned()
    }

    /// Check a credential pair against the table.
    ///
    /// Returns the matching user on success, `None` for an unknown email, a
    /// wrong password, or an account without credentials.
    #[must_use]
    pub fn verify_credentials(&self, email: &Email, password: &str) -> Option<User> {
        let inner = self.read();
        let encoded = inner.credentials.get(email.as_str())?;
        if !verify_password(encoded, password) {
            return None;
        }
        inner.users.iter().find(|u| &u.email == email).cloned()
    }

    /// Create a new user with a generated temporary password.
    ///
    /// Returns the created user and the plain temporary password so it can be
    /// handed to the new user once.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Conflict` if the email is already taken.
    pub fn create(
        &self,
        name: &str,
        email: Email,
        role: UserRole,
        permissions: Vec<Permission>,
    ) -> Result<(User, String), DirectoryError> {
        let mut inner = self.write();

        if inner.users.iter().any(|u| u.email == email) {
            return Err(DirectoryError::Conflict("email already exists".to_owned()));
        }

        let temp_password = generate_password(TEMP_PASSWORD_LENGTH);
        let user = User {
            id: inner.next_id,
            name: name.to_owned(),
            email: email.clone(),
            role,
            status: UserStatus::Active,
            verified: false,
            is_primary_admin: false,
            password_changed: false,
            last_login: None,
            permissions,
            created_at: Utc::now(),
        };

        inner.next_id = inner.next_id.next();
        inner
            .credentials
            .insert(email.into_inner(), encode_password(&temp_password));
        inner.users.push(user.clone());

        Ok((user, temp_password))
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::PrimaryAdminProtected` for the primary admin
    /// and `DirectoryError::NotFound` for unknown IDs.
    pub fn delete(&self, id: UserId) -> Result<User, DirectoryError> {
        let mut inner = self.write();

        let index = inner
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or(DirectoryError::NotFound)?;

        if inner
            .users
            .get(index)
            .is_some_and(|u| u.is_primary_admin)
        {
            return Err(DirectoryError::PrimaryAdminProtected("deleted"));
        }

        let removed = inner.users.remove(index);
        inner.credentials.remove(removed.email.as_str());
        Ok(removed)
    }

    /// Toggle a user's active/inactive status, returning the updated user.
    ///
    /// Toggling twice restores the original value.
    ///
    /// # Errors
    ///
    /// Deactivating the primary admin is rejected with
    /// `DirectoryError::PrimaryAdminProtected` and leaves the status
    /// unchanged.
    pub fn toggle_status(&self, id: UserId) -> Result<User, DirectoryError> {
        self.update(id, |user| {
            if user.is_primary_admin && user.status.is_active() {
                return Err(DirectoryError::PrimaryAdminProtected("deactivated"));
            }
            user.status = user.status.toggled();
            Ok(())
        })
    }

    /// Mark a user as verified.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::NotFound` for unknown IDs.
    pub fn verify(&self, id: UserId) -> Result<User, DirectoryError> {
        self.update(id, |user| {
            user.verified = true;
            Ok(())
        })
    }

    /// Promote a user to the admin role.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::NotFound` for unknown IDs.
    pub fn promote_to_admin(&self, id: UserId) -> Result<User, DirectoryError> {
        self.update(id, |user| {
            user.role = UserRole::Admin;
            Ok(())
        })
    }

    /// Replace a user's explicit permission list.
    ///
    /// # Errors
    ///
    /// The primary admin's permissions cannot be edited; the implicit grant
    /// covers everything.
    pub fn set_permissions(
        &self,
        id: UserId,
        permissions: Vec<Permission>,
    ) -> Result<User, DirectoryError> {
        self.update(id, |user| {
            if user.is_primary_admin {
                return Err(DirectoryError::PrimaryAdminProtected(
                    "stripped of permissions",
                ));
            }
            user.permissions = permissions.clone();
            Ok(())
        })
    }

    /// Merge a partial profile update into a user record.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Conflict` if a new email is already taken by
    /// another user.
    pub fn update_profile(&self, id: UserId, patch: &UserPatch) -> Result<User, DirectoryError> {
        let mut inner = self.write();

        if let Some(email) = &patch.email
            && inner.users.iter().any(|u| u.id != id && &u.email == email)
        {
            return Err(DirectoryError::Conflict("email already exists".to_owned()));
        }

        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(DirectoryError::NotFound)?;

        if let Some(name) = &patch.name {
            user.name.clone_from(name);
        }
        let updated = if let Some(email) = &patch.email {
            let old_email = user.email.clone();
            user.email = email.clone();
            let updated = user.clone();
            // Keep the credential table keyed by the current email.
            if let Some(encoded) = inner.credentials.remove(old_email.as_str()) {
                inner.credentials.insert(email.as_str().to_owned(), encoded);
            }
            updated
        } else {
            user.clone()
        };

        Ok(updated)
    }

    /// Store a new password for an account and mark it changed.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::NotFound` for unknown emails.
    pub fn set_password(&self, email: &Email, new_password: &str) -> Result<User, DirectoryError> {
        let mut inner = self.write();

        let user = inner
            .users
            .iter_mut()
            .find(|u| &u.email == email)
            .ok_or(DirectoryError::NotFound)?;
        user.password_changed = true;
        let updated = user.clone();

        inner
            .credentials
            .insert(email.as_str().to_owned(), encode_password(new_password));

        Ok(updated)
    }

    /// Record a successful login time.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::NotFound` for unknown IDs.
    pub fn touch_last_login(&self, id: UserId) -> Result<User, DirectoryError> {
        self.update(id, |user| {
            user.last_login = Some(Utc::now());
            Ok(())
        })
    }

    fn update(
        &self,
        id: UserId,
        mutate: impl FnOnce(&mut User) -> Result<(), DirectoryError>,
    ) -> Result<User, DirectoryError> {
        let mut inner = self.write();
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(DirectoryError::NotFound)?;
        mutate(user)?;
        Ok(user.clone())
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::seeded()
    }
}

fn seed_email(s: &str) -> Email {
    // Seed addresses are compile-time constants and always well-formed.
    Email::parse(s).unwrap_or_else(|_| unreachable!("seed email is valid"))
}

fn seed_users() -> Vec<User> {
    let created = Utc.with_ymd_and_hms(2023, 1, 15, 9, 0, 0).single();
    let all_but_backups: Vec<Permission> = Permission::ALL
        .into_iter()
        .filter(|p| *p != Permission::ManageBackups)
        .collect();

    vec![
        User {
            id: UserId::new(1),
            name: "Primary Admin".to_owned(),
            email: seed_email("primary@example.com"),
            role: UserRole::Admin,
            status: UserStatus::Active,
            verified: true,
            is_primary_admin: true,
            password_changed: true,
            last_login: Utc.with_ymd_and_hms(2023, 4, 10, 16, 30, 0).single(),
            // Empty list: the primary admin's grant is implicit.
            permissions: Vec::new(),
            created_at: created.unwrap_or_else(Utc::now),
        },
        User {
            id: UserId::new(2),
            name: "Admin User".to_owned(),
            email: seed_email("admin@example.com"),
            role: UserRole::Admin,
            status: UserStatus::Active,
            verified: true,
            is_primary_admin: false,
            password_changed: true,
            last_login: Utc.with_ymd_and_hms(2023, 4, 10, 14, 30, 0).single(),
            permissions: all_but_backups,
            created_at: created.unwrap_or_else(Utc::now),
        },
        User {
            id: UserId::new(3),
            name: "Staff User".to_owned(),
            email: seed_email("staff@example.com"),
            role: UserRole::Staff,
            status: UserStatus::Active,
            verified: true,
            is_primary_admin: false,
            password_changed: true,
            last_login: Utc.with_ymd_and_hms(2023, 4, 10, 13, 15, 0).single(),
            permissions: vec![
                Permission::ManageSales,
                Permission::ManageCustomers,
                Permission::ManageTickets,
                Permission::ProcessRefunds,
            ],
            created_at: created.unwrap_or_else(Utc::now),
        },
        User {
            id: UserId::new(4),
            name: "John Smith".to_owned(),
            email: seed_email("john.smith@example.com"),
            role: UserRole::Staff,
            status: UserStatus::Inactive,
            verified: false,
            is_primary_admin: false,
            password_changed: false,
            last_login: Utc.with_ymd_and_hms(2023, 4, 5, 9, 45, 0).single(),
            permissions: vec![Permission::ManageSales],
            created_at: created.unwrap_or_else(Utc::now),
        },
        User {
            id: UserId::new(5),
            name: "Sarah Johnson".to_owned(),
            email: seed_email("sarah.j@example.com"),
            role: UserRole::Staff,
            status: UserStatus::Active,
            verified: false,
            is_primary_admin: false,
            password_changed: false,
            last_login: None,
            permissions: Vec::new(),
            created_at: created.unwrap_or_else(Utc::now),
        },
    ]
}

fn seed_credentials() -> HashMap<String, String> {
    // Demo credentials, deliberately public: primary123 / admin123 / staff123.
    [
        ("primary@example.com", "primary123"),
        ("admin@example.com", "admin123"),
        ("staff@example.com", "staff123"),
    ]
    .into_iter()
    .map(|(email, password)| (email.to_owned(), encode_password(password)))
    .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_directory_has_demo_users() {
        let directory = UserDirectory::seeded();
        let users = directory.list();
        assert_eq!(users.len(), 5);
        assert!(users.first().unwrap().is_primary_admin);
    }

    #[test]
    fn test_get_by_email() {
        let directory = UserDirectory::seeded();
        let user = directory.get_by_email(&seed_email("admin@example.com")).unwrap();
        assert_eq!(user.id, UserId::new(2));
        assert!(directory.get_by_email(&seed_email("nobody@example.com")).is_none());
    }

    #[test]
    fn test_verify_credentials_primary_admin() {
        let directory = UserDirectory::seeded();
        let email = seed_email("primary@example.com");

        let user = directory.verify_credentials(&email, "primary123").unwrap();
        assert!(user.is_primary_admin);

        assert!(directory.verify_credentials(&email, "wrong").is_none());
    }

    #[test]
    fn test_verify_credentials_unknown_email() {
        let directory = UserDirectory::seeded();
        let email = seed_email("nobody@example.com");
        assert!(directory.verify_credentials(&email, "primary123").is_none());
    }

    #[test]
    fn test_account_without_credentials_cannot_log_in() {
        let directory = UserDirectory::seeded();
        let email = seed_email("sarah.j@example.com");
        assert!(directory.verify_credentials(&email, "").is_none());
    }

    #[test]
    fn test_create_assigns_next_id_and_temp_password() {
        let directory = UserDirectory::seeded();
        let (user, temp_password) = directory
            .create(
                "New Cashier",
                seed_email("cashier@example.com"),
                UserRole::Staff,
                vec![Permission::ManageSales],
            )
            .unwrap();

        assert_eq!(user.id, UserId::new(6));
        assert!(!user.verified);
        assert!(!user.password_changed);

        // The temp password works immediately.
        let logged_in = directory
            .verify_credentials(&user.email, &temp_password)
            .unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[test]
    fn test_create_duplicate_email_conflicts() {
        let directory = UserDirectory::seeded();
        let result = directory.create(
            "Duplicate",
            seed_email("staff@example.com"),
            UserRole::Staff,
            Vec::new(),
        );
        assert!(matches!(result, Err(DirectoryError::Conflict(_))));
    }

    #[test]
    fn test_delete_primary_admin_is_rejected() {
        let directory = UserDirectory::seeded();
        let result = directory.delete(UserId::new(1));
        assert!(matches!(
            result,
            Err(DirectoryError::PrimaryAdminProtected(_))
        ));
        assert_eq!(directory.list().len(), 5);
    }

    #[test]
    fn test_delete_removes_user_and_credentials() {
        let directory = UserDirectory::seeded();
        directory.delete(UserId::new(3)).unwrap();
        assert_eq!(directory.list().len(), 4);
        assert!(directory
            .verify_credentials(&seed_email("staff@example.com"), "staff123")
            .is_none());
    }

    #[test]
    fn test_toggle_status_twice_restores_original() {
        let directory = UserDirectory::seeded();
        let original = directory.get(UserId::new(3)).unwrap().status;

        let once = directory.toggle_status(UserId::new(3)).unwrap();
        assert_eq!(once.status, original.toggled());

        let twice = directory.toggle_status(UserId::new(3)).unwrap();
        assert_eq!(twice.status, original);
    }

    #[test]
    fn test_toggle_primary_admin_status_is_noop() {
        let directory = UserDirectory::seeded();
        let before = directory.get(UserId::new(1)).unwrap().status;

        let result = directory.toggle_status(UserId::new(1));
        assert!(matches!(
            result,
            Err(DirectoryError::PrimaryAdminProtected(_))
        ));

        let after = directory.get(UserId::new(1)).unwrap().status;
        assert_eq!(before, after);
    }

    #[test]
    fn test_reactivating_inactive_user_works() {
        let directory = UserDirectory::seeded();
        // John Smith is seeded inactive.
        let user = directory.toggle_status(UserId::new(4)).unwrap();
        assert_eq!(user.status, UserStatus::Active);
    }

    #[test]
    fn test_verify_and_promote() {
        let directory = UserDirectory::seeded();

        let verified = directory.verify(UserId::new(5)).unwrap();
        assert!(verified.verified);

        let promoted = directory.promote_to_admin(UserId::new(3)).unwrap();
        assert_eq!(promoted.role, UserRole::Admin);
    }

    #[test]
    fn test_set_permissions_rejected_for_primary_admin() {
        let directory = UserDirectory::seeded();
        let result = directory.set_permissions(UserId::new(1), Vec::new());
        assert!(matches!(
            result,
            Err(DirectoryError::PrimaryAdminProtected(_))
        ));
    }

    #[test]
    fn test_set_permissions_replaces_list() {
        let directory = UserDirectory::seeded();
        let user = directory
            .set_permissions(UserId::new(5), vec![Permission::ViewReports])
            .unwrap();
        assert_eq!(user.permissions, vec![Permission::ViewReports]);
    }

    #[test]
    fn test_update_profile_merges_and_rekeys_credentials() {
        let directory = UserDirectory::seeded();
        let patch = UserPatch {
            name: Some("Staff Renamed".to_owned()),
            email: Some(seed_email("renamed@example.com")),
        };

        let user = directory.update_profile(UserId::new(3), &patch).unwrap();
        assert_eq!(user.name, "Staff Renamed");
        assert_eq!(user.email.as_str(), "renamed@example.com");

        // The old email no longer logs in; the new one does.
        assert!(directory
            .verify_credentials(&seed_email("staff@example.com"), "staff123")
            .is_none());
        assert!(directory
            .verify_credentials(&seed_email("renamed@example.com"), "staff123")
            .is_some());
    }

    #[test]
    fn test_update_profile_email_conflict() {
        let directory = UserDirectory::seeded();
        let patch = UserPatch {
            name: None,
            email: Some(seed_email("admin@example.com")),
        };
        let result = directory.update_profile(UserId::new(3), &patch);
        assert!(matches!(result, Err(DirectoryError::Conflict(_))));
    }

    #[test]
    fn test_set_password_marks_changed() {
        let directory = UserDirectory::seeded();
        let email = seed_email("staff@example.com");

        let user = directory.set_password(&email, "n3w-Passw0rd!").unwrap();
        assert!(user.password_changed);

        assert!(directory.verify_credentials(&email, "staff123").is_none());
        assert!(directory.verify_credentials(&email, "n3w-Passw0rd!").is_some());
    }

    #[test]
    fn test_touch_last_login() {
        let directory = UserDirectory::seeded();
        let before = directory.get(UserId::new(5)).unwrap();
        assert!(before.last_login.is_none());

        let after = directory.touch_last_login(UserId::new(5)).unwrap();
        assert!(after.last_login.is_some());
    }
}
