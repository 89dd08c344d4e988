//! Permission catalogue route.

use axum::Json;

use tillpoint_core::{PermissionGroup, permission_groups};

use crate::middleware::RequireUser;

/// GET /api/permissions/groups
///
/// The canonical permission grouping. Any logged-in user may read it; the
/// groups are static data, not a policy decision.
pub async fn groups(RequireUser(_actor): RequireUser) -> Json<Vec<PermissionGroup>> {
    Json(permission_groups())
}
