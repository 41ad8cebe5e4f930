use axum::extract::{Query, State};
use axum::http::header::CACHE_CONTROL;
use axum::response::IntoResponse;
use axum::Json;
use vows_core::record::ResolvedSite;

use crate::error::AppResult;
use crate::handlers::publish::SubdomainQuery;
use crate::handlers::required;
use crate::state::AppState;

/// GET /api/v1/resolve?subdomain=
///
/// Unknown subdomains resolve to `published: false` rather than 404, so the
/// edge can cache negative answers. Cacheable for `resolve_max_age_secs`.
pub async fn resolve(
    State(state): State<AppState>,
    Query(params): Query<SubdomainQuery>,
) -> AppResult<impl IntoResponse> {
    let subdomain = required(&params.subdomain, "subdomain")?;
    let site: ResolvedSite = state.publisher.resolve(subdomain).await?;

    let cache_control = format!("public, max-age={}", state.config.resolve_max_age_secs);
    Ok(([(CACHE_CONTROL, cache_control)], Json(site)))
}
