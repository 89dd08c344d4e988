//! Audit trail routes. Read-only; entries are written by the other handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;

use tillpoint_core::Permission;

use crate::error::AppError;
use crate::middleware::{RequireUser, require_permission};
use crate::models::AuditLogEntry;
use crate::state::AppState;
use crate::store::AuditQuery;

#[derive(Debug, Deserialize, Default)]
pub struct AuditParams {
    /// Exact module name filter.
    pub module: Option<String>,
    /// Free-text search over actor, action, and details.
    pub q: Option<String>,
    /// Calendar day (UTC), `YYYY-MM-DD`.
    pub date: Option<NaiveDate>,
}

impl From<AuditParams> for AuditQuery {
    fn from(params: AuditParams) -> Self {
        Self {
            module: params.module,
            search: params.q,
            date: params.date,
        }
    }
}

/// GET /api/audit?module=&q=&date=
pub async fn list(
    State(state): State<AppState>,
    RequireUser(actor): RequireUser,
    Query(params): Query<AuditParams>,
) -> Result<Json<Vec<AuditLogEntry>>, AppError> {
    require_permission(&actor, Permission::ViewAuditLogs)?;
    Ok(Json(state.audit().list(&params.into())))
}

/// GET /api/audit/modules
///
/// Distinct module names for the filter dropdown.
pub async fn modules(
    State(state): State<AppState>,
    RequireUser(actor): RequireUser,
) -> Result<Json<Vec<String>>, AppError> {
    require_permission(&actor, Permission::ViewAuditLogs)?;
    Ok(Json(state.audit().modules()))
}
