//! Login and token refresh.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use panel_auth::{IdentityStore, LoginIdentifier};

use crate::app::{dto, errors};
use crate::context::RefreshContext;
use crate::state::AppState;

/// POST /auth/login - exchange credentials for an access/refresh pair.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<dto::LoginRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "malformed_request", rejection.body_text());
        }
    };

    let identifier = match LoginIdentifier::from_parts(req.username.as_deref(), req.email.as_deref()) {
        Ok(id) => id,
        Err(e) => return errors::auth_error_to_response(e),
    };

    let principal = match state.credentials.verify(&identifier, &req.password).await {
        Ok(p) => p,
        Err(e) => return errors::auth_error_to_response(e),
    };

    let pair = match state.issuer.issue_pair(&principal) {
        Ok(pair) => pair,
        Err(e) => return errors::token_error_to_response(e),
    };

    tracing::info!(user_id = %principal.user_id, "login succeeded");
    (StatusCode::OK, Json(dto::TokenPairResponse::from(pair))).into_response()
}

/// GET /auth/refresh - mint a new access token for the refresh token's subject.
///
/// Permissions are re-read from the directory, so role changes take effect here.
pub async fn refresh(
    State(state): State<AppState>,
    ctx: RefreshContext,
) -> axum::response::Response {
    let principal = match state.store.by_identity(ctx.user_id()).await {
        Ok(Some(p)) => p,
        // A vanished subject is an authentication failure, not a storage fault.
        Ok(None) => {
            tracing::warn!(user_id = %ctx.user_id(), "refresh for identity that no longer exists");
            return errors::unauthorized();
        }
        Err(e) => {
            tracing::error!(user_id = %ctx.user_id(), error = %e, "identity lookup failed during refresh");
            return errors::internal_error();
        }
    };

    match state.issuer.issue_access(&principal) {
        Ok(access_token) => {
            tracing::debug!(user_id = %principal.user_id, "access token refreshed");
            (StatusCode::OK, Json(dto::AccessTokenResponse { access_token })).into_response()
        }
        Err(e) => errors::token_error_to_response(e),
    }
}
