//! HTTP route handlers for the back-office JSON API.

pub mod audit;
pub mod auth;
pub mod permissions;
pub mod settings;
pub mod users;

use axum::{
    Json, Router,
    routing::{delete, get, patch, post},
};
use serde_json::{Value, json};

use crate::state::AppState;

/// Build the API router. Layers (sessions, tracing) are applied by the
/// caller.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // ====== Authentication ======
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/session", get(auth::session))
        .route("/api/auth/profile", patch(auth::update_profile))
        .route("/api/auth/password", post(auth::change_password))
        // ====== User management ======
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/users/{id}", delete(users::remove))
        .route("/api/users/{id}/status", post(users::toggle_status))
        .route("/api/users/{id}/verify", post(users::verify))
        .route("/api/users/{id}/promote", post(users::promote))
        .route(
            "/api/users/{id}/permissions",
            get(users::get_permissions).put(users::set_permissions),
        )
        // ====== Permissions, audit, settings ======
        .route("/api/permissions/groups", get(permissions::groups))
        .route("/api/audit", get(audit::list))
        .route("/api/audit/modules", get(audit::modules))
        .route(
            "/api/settings/security",
            get(settings::get_security).put(settings::update_security),
        )
}

/// Liveness check.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
