//! Edge router builder shared by `main.rs` and the integration tests.

use axum::extract::State;
use axum::http::HeaderName;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::handler;
use crate::headers::security_headers;
use crate::state::EdgeState;

/// Path of the edge's own health probe. Dot segments never map to site
/// content, so this cannot shadow a published file.
pub const HEALTH_PATH: &str = "/.edge/health";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeHealth {
    pub status: &'static str,
    pub version: &'static str,
    pub store_backend: &'static str,
    pub cached_sites: u64,
}

async fn health(State(state): State<EdgeState>) -> Json<EdgeHealth> {
    Json(EdgeHealth {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        store_backend: state.store.backend_name(),
        cached_sites: state.resolver.cached_entries(),
    })
}

/// Build the edge [`Router`]: every path not claimed by the health probe
/// is served from the resolved site.
///
/// Layers, outermost first: request ID, tracing, request ID propagation,
/// security headers, panic recovery.
pub fn build_edge_router(state: EdgeState) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    let [nosniff, frame_options, referrer, csp] = security_headers();

    Router::new()
        .route(HEALTH_PATH, get(health))
        .fallback(handler::serve_site)
        .layer(CatchPanicLayer::new())
        .layer(SetResponseHeaderLayer::overriding(nosniff.0, nosniff.1))
        .layer(SetResponseHeaderLayer::overriding(frame_options.0, frame_options.1))
        .layer(SetResponseHeaderLayer::overriding(referrer.0, referrer.1))
        .layer(SetResponseHeaderLayer::overriding(csp.0, csp.1))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .with_state(state)
}
