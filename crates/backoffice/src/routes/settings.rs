//! Security settings routes.

use axum::{Json, extract::State};
use tower_sessions::Session;

use tillpoint_core::Permission;

use crate::error::AppError;
use crate::middleware::{RequireUser, expiry_from_settings, require_permission};
use crate::models::SecuritySettings;
use crate::state::AppState;

/// Audit module name for settings events.
const AUDIT_MODULE: &str = "Settings";

/// GET /api/settings/security
pub async fn get_security(
    State(state): State<AppState>,
    RequireUser(actor): RequireUser,
) -> Result<Json<SecuritySettings>, AppError> {
    require_permission(&actor, Permission::ManageSettings)?;
    Ok(Json(state.security_settings()))
}

/// PUT /api/settings/security
///
/// The new inactivity window applies to the acting session immediately and
/// to every other session at its next login.
pub async fn update_security(
    State(state): State<AppState>,
    RequireUser(actor): RequireUser,
    session: Session,
    Json(settings): Json<SecuritySettings>,
) -> Result<Json<SecuritySettings>, AppError> {
    require_permission(&actor, Permission::ManageSettings)?;

    if settings.session_timeout && settings.timeout_duration_minutes == 0 {
        return Err(AppError::BadRequest(
            "timeout duration must be at least one minute".to_owned(),
        ));
    }

    let previous = state.security_settings();
    state.set_security_settings(settings.clone());

    session.set_expiry(Some(expiry_from_settings(&settings)));

    state.audit().record(
        &actor.name,
        "Settings Updated",
        &describe_changes(&previous, &settings),
        AUDIT_MODULE,
    );

    Ok(Json(settings))
}

/// Spell out which fields actually changed between two settings snapshots.
fn describe_changes(previous: &SecuritySettings, current: &SecuritySettings) -> String {
    let mut changes = Vec::new();

    if current.two_factor_auth != previous.two_factor_auth {
        changes.push(if current.two_factor_auth {
            "Enabled two-factor auth".to_owned()
        } else {
            "Disabled two-factor auth".to_owned()
        });
    }
    if current.session_timeout != previous.session_timeout {
        changes.push(if current.session_timeout {
            "Enabled session timeout".to_owned()
        } else {
            "Disabled session timeout".to_owned()
        });
    }
    if current.timeout_duration_minutes != previous.timeout_duration_minutes {
        changes.push(format!(
            "Changed session timeout to {} minutes",
            current.timeout_duration_minutes
        ));
    }

    if changes.is_empty() {
        "Saved security settings unchanged".to_owned()
    } else {
        changes.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(two_factor: bool, timeout: bool, minutes: u64) -> SecuritySettings {
        SecuritySettings {
            two_factor_auth: two_factor,
            session_timeout: timeout,
            timeout_duration_minutes: minutes,
        }
    }

    #[test]
    fn test_describe_timeout_change_only() {
        let detail = describe_changes(&settings(false, true, 30), &settings(false, true, 45));
        assert_eq!(detail, "Changed session timeout to 45 minutes");
    }

    #[test]
    fn test_describe_two_factor_flip_does_not_mention_timeout() {
        let detail = describe_changes(&settings(false, true, 30), &settings(true, true, 30));
        assert_eq!(detail, "Enabled two-factor auth");
    }

    #[test]
    fn test_describe_multiple_changes() {
        let detail = describe_changes(&settings(false, true, 30), &settings(true, false, 30));
        assert_eq!(detail, "Enabled two-factor auth; Disabled session timeout");
    }

    #[test]
    fn test_describe_no_changes() {
        let detail = describe_changes(&settings(false, true, 30), &settings(false, true, 30));
        assert_eq!(detail, "Saved security settings unchanged");
    }
}
