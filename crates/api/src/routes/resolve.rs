use axum::routing::get;
use axum::Router;

use crate::handlers::resolve;
use crate::state::AppState;

/// `GET /resolve` for the edge.
pub fn router() -> Router<AppState> {
    Router::new().route("/resolve", get(resolve::resolve))
}
