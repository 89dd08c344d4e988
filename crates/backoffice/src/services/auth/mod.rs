//! Authentication service.
//!
//! Checks credentials against the demo table, keeps `last_login` current, and
//! records audit entries for every notable outcome. There is no token
//! issuance and no real hashing; see [`password`] for the placeholder
//! encoding.

mod error;
pub mod password;

pub use error::AuthError;

use tillpoint_core::{Email, UserId};

use crate::models::{User, UserPatch};
use crate::store::{AuditTrail, UserDirectory};

/// Audit module name for authentication events.
pub const AUDIT_MODULE: &str = "Authentication";

/// Minimum accepted password length for password changes.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service over the user directory and audit trail.
pub struct AuthService<'a> {
    directory: &'a UserDirectory,
    audit: &'a AuditTrail,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(directory: &'a UserDirectory, audit: &'a AuditTrail) -> Self {
        Self { directory, audit }
    }

    /// Check a credential pair and return the logged-in user.
    ///
    /// On success the user's `last_login` is updated and a "User Login" audit
    /// entry is recorded. Every failure records a "Failed Login" entry
    /// carrying the attempted input with actor "Unknown", malformed addresses
    /// included.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for malformed input and
    /// `AuthError::InvalidCredentials` when the pair is not in the table.
    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let parsed = match Email::parse(email) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.record_failed_login(email);
                return Err(err.into());
            }
        };

        let Some(user) = self.directory.verify_credentials(&parsed, password) else {
            self.record_failed_login(email);
            return Err(AuthError::InvalidCredentials);
        };

        let user = self.directory.touch_last_login(user.id)?;
        self.audit.record(
            &user.name,
            "User Login",
            "User logged in successfully",
            AUDIT_MODULE,
        );

        Ok(user)
    }

    /// Record an unmatched login attempt, keeping the raw attempted input so
    /// the trail shows exactly what was typed.
    fn record_failed_login(&self, attempted: &str) {
        self.audit.record(
            "Unknown",
            "Failed Login",
            &format!("Failed login attempt for email: {attempted}"),
            AUDIT_MODULE,
        );
    }

    /// Record a logout for the given user.
    ///
    /// Clearing the session itself is the caller's job; an absent user (an
    /// already-expired session) records nothing.
    pub fn logout(&self, user: Option<&User>) {
        if let Some(user) = user {
            self.audit
                .record(&user.name, "User Logout", "User logged out", AUDIT_MODULE);
        }
    }

    /// Merge a partial profile update into the user's directory record.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Directory` on unknown users or email conflicts.
    pub fn update_user(&self, id: UserId, patch: &UserPatch) -> Result<User, AuthError> {
        let user = self.directory.update_profile(id, patch)?;
        Ok(user)
    }

    /// Change a user's password after verifying the current one.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the current password is
    /// wrong and `AuthError::WeakPassword` if the new one is too short.
    pub fn change_password(
        &self,
        user: &User,
        current_password: &str,
        new_password: &str,
    ) -> Result<User, AuthError> {
        if self
            .directory
            .verify_credentials(&user.email, current_password)
            .is_none()
        {
            return Err(AuthError::InvalidCredentials);
        }

        if new_password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword {
                min: MIN_PASSWORD_LENGTH,
            });
        }

        let updated = self.directory.set_password(&user.email, new_password)?;
        self.audit.record(
            &user.name,
            "Password Changed",
            "User changed their password",
            AUDIT_MODULE,
        );

        Ok(updated)
    }

    /// Re-verify the acting admin's own password before a sensitive action.
    ///
    /// The add-user, verify, and promote flows all require the admin to type
    /// their password again.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AdminPasswordIncorrect` on mismatch.
    pub fn confirm_password(&self, user: &User, password: &str) -> Result<(), AuthError> {
        if self
            .directory
            .verify_credentials(&user.email, password)
            .is_none()
        {
            return Err(AuthError::AdminPasswordIncorrect);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::AuditQuery;

    fn stores() -> (UserDirectory, AuditTrail) {
        (UserDirectory::seeded(), AuditTrail::empty())
    }

    #[test]
    fn test_login_primary_admin_succeeds() {
        let (directory, audit) = stores();
        let auth = AuthService::new(&directory, &audit);

        let user = auth.login("primary@example.com", "primary123").unwrap();
        assert!(user.is_primary_admin);
        assert!(user.last_login.is_some());

        let entries = audit.list(&AuditQuery::default());
        assert_eq!(entries.first().unwrap().action, "User Login");
        assert_eq!(entries.first().unwrap().actor, "Primary Admin");
    }

    #[test]
    fn test_login_wrong_password_records_failed_attempt() {
        let (directory, audit) = stores();
        let auth = AuthService::new(&directory, &audit);

        let result = auth.login("admin@example.com", "nope");
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));

        let entries = audit.list(&AuditQuery::default());
        let newest = entries.first().unwrap();
        assert_eq!(newest.action, "Failed Login");
        assert_eq!(newest.actor, "Unknown");
        assert!(newest.details.contains("admin@example.com"));
    }

    #[test]
    fn test_login_unknown_email_fails() {
        let (directory, audit) = stores();
        let auth = AuthService::new(&directory, &audit);
        let result = auth.login("ghost@example.com", "primary123");
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_login_malformed_email_records_failed_attempt() {
        let (directory, audit) = stores();
        let auth = AuthService::new(&directory, &audit);

        let result = auth.login("not-an-email", "primary123");
        assert!(matches!(result, Err(AuthError::InvalidEmail(_))));

        // The attempt is still audited, with the raw input.
        let entries = audit.list(&AuditQuery::default());
        assert_eq!(entries.len(), 1);
        let newest = entries.first().unwrap();
        assert_eq!(newest.action, "Failed Login");
        assert_eq!(newest.actor, "Unknown");
        assert!(newest.details.contains("not-an-email"));
    }

    #[test]
    fn test_logout_records_entry_only_when_logged_in() {
        let (directory, audit) = stores();
        let auth = AuthService::new(&directory, &audit);

        auth.logout(None);
        assert!(audit.is_empty());

        let user = auth.login("staff@example.com", "staff123").unwrap();
        auth.logout(Some(&user));

        let entries = audit.list(&AuditQuery::default());
        assert_eq!(entries.first().unwrap().action, "User Logout");
    }

    #[test]
    fn test_change_password_requires_current() {
        let (directory, audit) = stores();
        let auth = AuthService::new(&directory, &audit);
        let user = auth.login("staff@example.com", "staff123").unwrap();

        let result = auth.change_password(&user, "wrong", "longenough1");
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_change_password_rejects_short_replacement() {
        let (directory, audit) = stores();
        let auth = AuthService::new(&directory, &audit);
        let user = auth.login("staff@example.com", "staff123").unwrap();

        let result = auth.change_password(&user, "staff123", "short");
        assert!(matches!(result, Err(AuthError::WeakPassword { .. })));
    }

    #[test]
    fn test_change_password_happy_path() {
        let (directory, audit) = stores();
        let auth = AuthService::new(&directory, &audit);
        let user = auth.login("staff@example.com", "staff123").unwrap();

        let updated = auth.change_password(&user, "staff123", "longenough1").unwrap();
        assert!(updated.password_changed);

        assert!(auth.login("staff@example.com", "staff123").is_err());
        assert!(auth.login("staff@example.com", "longenough1").is_ok());
    }

    #[test]
    fn test_confirm_password() {
        let (directory, audit) = stores();
        let auth = AuthService::new(&directory, &audit);
        let admin = auth.login("admin@example.com", "admin123").unwrap();

        assert!(auth.confirm_password(&admin, "admin123").is_ok());
        assert!(matches!(
            auth.confirm_password(&admin, "primary123"),
            Err(AuthError::AdminPasswordIncorrect)
        ));
    }
}
