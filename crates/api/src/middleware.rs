use axum::{
    extract::State,
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use panel_auth::{authenticate_access, authenticate_refresh};

use crate::app::errors::unauthorized;
use crate::context::{AccessContext, RefreshContext};
use crate::state::AppState;

/// Access gate. Every failure is the same 401; the reason is only logged.
pub async fn access_middleware(
    State(state): State<AppState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let claims = match authenticate_access(&state.validator, authorization(req.headers()), Utc::now()) {
        Ok(claims) => claims,
        Err(_) => return unauthorized(),
    };

    req.extensions_mut().insert(AccessContext::new(claims));
    next.run(req).await
}

/// Refresh gate. Only accepts tokens signed with the refresh secret.
pub async fn refresh_middleware(
    State(state): State<AppState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let claims = match authenticate_refresh(&state.validator, authorization(req.headers()), Utc::now()) {
        Ok(claims) => claims,
        Err(_) => return unauthorized(),
    };

    req.extensions_mut().insert(RefreshContext::new(claims.sub));
    next.run(req).await
}

/// Non-UTF-8 header values are treated as absent.
fn authorization(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}
