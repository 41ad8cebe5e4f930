pub mod health;
pub mod publish;
pub mod resolve;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /validate        GET   ?subdomain=&invitationId=   availability check
/// /publish         POST  {invitationId, subdomain}   render + publish next version
/// /versions        GET   ?subdomain=                 publish history, newest first
/// /rollback        POST  {subdomain, version}        repoint current version
///
/// /resolve         GET   ?subdomain=                 edge-facing publish state
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(publish::router())
        .merge(resolve::router())
}
