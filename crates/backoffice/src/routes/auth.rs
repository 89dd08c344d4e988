//! Authentication routes: login, logout, session inspection, profile and
//! password updates for the logged-in user.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_sessions::Session;

use tillpoint_core::Email;

use crate::error::AppError;
use crate::middleware::auth::{clear_current_user, set_current_user};
use crate::middleware::{OptionalUser, RequireUser, expiry_from_settings};
use crate::models::{User, UserPatch};
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

fn session_error(err: tower_sessions::session::Error) -> AppError {
    AppError::Internal(format!("session store error: {err}"))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<User>, AppError> {
    let auth = AuthService::new(state.directory(), state.audit());
    let user = auth.login(&request.email, &request.password)?;

    set_current_user(&session, &user)
        .await
        .map_err(session_error)?;

    // New sessions pick up the currently stored timeout, not the value the
    // layer was built with at startup.
    session.set_expiry(Some(expiry_from_settings(&state.security_settings())));

    tracing::info!(user_id = %user.id, "user logged in");
    Ok(Json(user))
}

/// POST /api/auth/logout
///
/// Always succeeds: logging out of an expired session is not an error.
pub async fn logout(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    session: Session,
) -> Result<StatusCode, AppError> {
    let auth = AuthService::new(state.directory(), state.audit());
    auth.logout(user.as_ref());

    clear_current_user(&session).await.map_err(session_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/session
///
/// Returns the current user snapshot, or `{"user": null}` when logged out.
pub async fn session(OptionalUser(user): OptionalUser) -> Json<Value> {
    Json(json!({ "user": user }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// PATCH /api/auth/profile
///
/// Merge semantics: absent fields are left untouched. The session snapshot
/// is refreshed so later requests see the update.
pub async fn update_profile(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    session: Session,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<User>, AppError> {
    let email = match request.email.as_deref() {
        Some(raw) => Some(Email::parse(raw).map_err(AuthError::from)?),
        None => None,
    };
    let patch = UserPatch {
        name: request.name,
        email,
    };
    if patch.is_empty() {
        return Err(AppError::BadRequest("no fields to update".to_owned()));
    }

    let auth = AuthService::new(state.directory(), state.audit());
    let updated = auth.update_user(user.id, &patch)?;

    set_current_user(&session, &updated)
        .await
        .map_err(session_error)?;

    Ok(Json(updated))
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// POST /api/auth/password
pub async fn change_password(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    session: Session,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<User>, AppError> {
    let auth = AuthService::new(state.directory(), state.audit());
    let updated = auth.change_password(&user, &request.current_password, &request.new_password)?;

    set_current_user(&session, &updated)
        .await
        .map_err(session_error)?;

    Ok(Json(updated))
}
