use axum::{Router, routing::get};

use crate::state::AppState;

pub mod auth;
pub mod system;

/// Router for all endpoints behind the access gate.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/permissions", get(system::list_permissions))
}
