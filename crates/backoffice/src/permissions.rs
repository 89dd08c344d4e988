//! Permission evaluator.
//!
//! A pure check recomputed on every call from the in-memory user state: no
//! caching, no invalidation, no hierarchy beyond the primary-admin
//! short-circuit.

use tillpoint_core::Permission;

use crate::models::User;

/// Whether `user` holds `permission`.
///
/// - `None` (not logged in) never holds any permission.
/// - The primary admin implicitly holds every permission, regardless of the
///   explicit list.
/// - Everyone else is checked against their explicit permission list.
#[must_use]
pub fn has_permission(user: Option<&User>, permission: Permission) -> bool {
    let Some(user) = user else {
        return false;
    };

    if user.is_primary_admin {
        return true;
    }

    user.has_explicit_permission(permission)
}
