//! Route definitions for the builder-facing publish API.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::publish;
use crate::state::AppState;

/// Routes mounted at the `/api/v1` root.
///
/// ```text
/// GET  /validate   -> validate_subdomain
/// POST /publish    -> publish
/// GET  /versions   -> list_versions
/// POST /rollback   -> rollback
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/validate", get(publish::validate_subdomain))
        .route("/publish", post(publish::publish))
        .route("/versions", get(publish::list_versions))
        .route("/rollback", post(publish::rollback))
}
