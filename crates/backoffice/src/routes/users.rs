//! User management routes.
//!
//! Every route here requires the `manage_users` permission. The sensitive
//! flows (creating users, verifying, promoting) additionally ask the acting
//! user to re-enter their own password.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use tillpoint_core::{Email, Permission, UserId, UserRole};

use crate::error::AppError;
use crate::middleware::{RequireUser, require_permission};
use crate::models::User;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

/// Audit module name for user management events.
const AUDIT_MODULE: &str = "User Management";

/// GET /api/users
pub async fn list(
    State(state): State<AppState>,
    RequireUser(actor): RequireUser,
) -> Result<Json<Vec<User>>, AppError> {
    require_permission(&actor, Permission::ManageUsers)?;
    Ok(Json(state.directory().list()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    /// The acting user's own password, re-entered for confirmation.
    pub admin_password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUserResponse {
    pub user: User,
    /// Generated temporary password, returned exactly once.
    pub temp_password: String,
}

/// POST /api/users
///
/// Creating another admin account is reserved for the primary admin.
pub async fn create(
    State(state): State<AppState>,
    RequireUser(actor): RequireUser,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreatedUserResponse>), AppError> {
    require_permission(&actor, Permission::ManageUsers)?;

    let auth = AuthService::new(state.directory(), state.audit());
    auth.confirm_password(&actor, &request.admin_password)?;

    if request.role.is_admin() && !actor.is_primary_admin {
        return Err(AppError::Forbidden(
            "only the primary administrator can create admin accounts".to_owned(),
        ));
    }

    let email = Email::parse(&request.email).map_err(AuthError::from)?;
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_owned()));
    }

    let (user, temp_password) =
        state
            .directory()
            .create(name, email, request.role, request.permissions)?;

    state.audit().record(
        &actor.name,
        "User Created",
        &format!("Created {} account for {}", user.role, user.name),
        AUDIT_MODULE,
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedUserResponse {
            user,
            temp_password,
        }),
    ))
}

/// DELETE /api/users/{id}
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(actor): RequireUser,
    Path(id): Path<UserId>,
) -> Result<StatusCode, AppError> {
    require_permission(&actor, Permission::ManageUsers)?;

    let removed = state.directory().delete(id)?;
    state.audit().record(
        &actor.name,
        "User Deleted",
        &format!("Deleted user account: {}", removed.name),
        AUDIT_MODULE,
    );

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/users/{id}/status
///
/// Flips active/inactive. Deactivating the primary admin is rejected with
/// 409 and the status stays unchanged.
pub async fn toggle_status(
    State(state): State<AppState>,
    RequireUser(actor): RequireUser,
    Path(id): Path<UserId>,
) -> Result<Json<User>, AppError> {
    require_permission(&actor, Permission::ManageUsers)?;

    let updated = state.directory().toggle_status(id)?;
    state.audit().record(
        &actor.name,
        "Status Changed",
        &format!("{} is now {}", updated.name, updated.status),
        AUDIT_MODULE,
    );

    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmActionRequest {
    /// The acting user's own password, re-entered for confirmation.
    pub admin_password: String,
}

/// POST /api/users/{id}/verify
pub async fn verify(
    State(state): State<AppState>,
    RequireUser(actor): RequireUser,
    Path(id): Path<UserId>,
    Json(request): Json<ConfirmActionRequest>,
) -> Result<Json<User>, AppError> {
    require_permission(&actor, Permission::ManageUsers)?;

    let auth = AuthService::new(state.directory(), state.audit());
    auth.confirm_password(&actor, &request.admin_password)?;

    let updated = state.directory().verify(id)?;
    state.audit().record(
        &actor.name,
        "User Verified",
        &format!("Verified account: {}", updated.name),
        AUDIT_MODULE,
    );

    Ok(Json(updated))
}

/// POST /api/users/{id}/promote
///
/// Primary admin only.
pub async fn promote(
    State(state): State<AppState>,
    RequireUser(actor): RequireUser,
    Path(id): Path<UserId>,
    Json(request): Json<ConfirmActionRequest>,
) -> Result<Json<User>, AppError> {
    require_permission(&actor, Permission::ManageUsers)?;

    if !actor.is_primary_admin {
        return Err(AppError::Forbidden(
            "only the primary administrator can promote users".to_owned(),
        ));
    }

    let auth = AuthService::new(state.directory(), state.audit());
    auth.confirm_password(&actor, &request.admin_password)?;

    let updated = state.directory().promote_to_admin(id)?;
    state.audit().record(
        &actor.name,
        "User Promoted",
        &format!("Promoted {} to administrator", updated.name),
        AUDIT_MODULE,
    );

    Ok(Json(updated))
}

/// GET /api/users/{id}/permissions
pub async fn get_permissions(
    State(state): State<AppState>,
    RequireUser(actor): RequireUser,
    Path(id): Path<UserId>,
) -> Result<Json<Vec<Permission>>, AppError> {
    require_permission(&actor, Permission::ManageUsers)?;
    let user = state.directory().get(id)?;
    Ok(Json(user.permissions))
}

#[derive(Debug, Deserialize)]
pub struct SetPermissionsRequest {
    pub permissions: Vec<Permission>,
}

/// PUT /api/users/{id}/permissions
///
/// Replaces the explicit list wholesale. The primary admin's grant is
/// implicit and cannot be edited.
pub async fn set_permissions(
    State(state): State<AppState>,
    RequireUser(actor): RequireUser,
    Path(id): Path<UserId>,
    Json(request): Json<SetPermissionsRequest>,
) -> Result<Json<User>, AppError> {
    require_permission(&actor, Permission::ManageUsers)?;

    let updated = state.directory().set_permissions(id, request.permissions)?;
    state.audit().record(
        &actor.name,
        "Permissions Updated",
        &format!(
            "Updated permissions for {} ({} granted)",
            updated.name,
            updated.permissions.len()
        ),
        AUDIT_MODULE,
    );

    Ok(Json(updated))
}
