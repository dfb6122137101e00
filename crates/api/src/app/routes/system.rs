use axum::{Json, http::StatusCode, response::IntoResponse};

use panel_auth::{PermissionSet, catalog, require_permission};

use crate::app::{dto, errors};
use crate::context::AccessContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// GET /whoami - identity and permission snapshot of the presented token.
pub async fn whoami(ctx: AccessContext) -> impl IntoResponse {
    Json(dto::WhoAmIResponse {
        user_id: ctx.user_id(),
        permissions: ctx.permissions().clone(),
    })
}

/// GET /permissions - the capability catalog, for building role editors.
pub async fn list_permissions(ctx: AccessContext) -> axum::response::Response {
    if let Err(e) = require_permission(ctx.claims(), &catalog::ROLES_READ) {
        tracing::debug!(user_id = %ctx.user_id(), error = %e, "permission denied");
        return errors::authz_error_to_response(e);
    }

    (
        StatusCode::OK,
        Json(dto::PermissionCatalogResponse {
            permissions: PermissionSet::all(),
        }),
    )
        .into_response()
}
