use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use panel_auth::{AuthError, AuthzError, TokenError};

/// Map a login-path failure. Storage details are logged where they occur and
/// never echoed to the client.
pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    match err {
        AuthError::RequestMalformed(msg) => json_error(StatusCode::BAD_REQUEST, "malformed_request", msg),
        AuthError::IdentityNotFound => json_error(StatusCode::NOT_FOUND, "not_found", "identity not found"),
        AuthError::AuthenticationFailed => {
            json_error(StatusCode::UNAUTHORIZED, "unauthorized", "authentication failed")
        }
        AuthError::StorageFailure(_) => internal_error(),
    }
}

pub fn authz_error_to_response(err: AuthzError) -> axum::response::Response {
    json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string())
}

/// Signing failures are not the caller's fault.
pub fn token_error_to_response(err: TokenError) -> axum::response::Response {
    tracing::error!(error = %err, "failed to sign token");
    internal_error()
}

/// The single response for every gate failure.
pub fn unauthorized() -> axum::response::Response {
    json_error(StatusCode::UNAUTHORIZED, "unauthorized", "unauthorized")
}

pub fn internal_error() -> axum::response::Response {
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal error")
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
