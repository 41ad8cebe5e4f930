//! Handlers for the builder-facing publish API.
//!
//! Validation, publishing, history and rollback all delegate to the
//! [`vows_publish::Publisher`] held in [`AppState`]; these functions only
//! parse input and shape JSON.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use vows_core::record::VersionSummary;
use vows_core::subdomain::SubdomainCheck;
use vows_core::types::Version;
use vows_publish::PublishOutcome;

use crate::error::AppResult;
use crate::handlers::required;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateQuery {
    pub subdomain: Option<String>,
    /// The invitation asking; a name it already owns is reported available.
    pub invitation_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub invitation_id: Option<String>,
    pub subdomain: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubdomainQuery {
    pub subdomain: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RollbackRequest {
    pub subdomain: Option<String>,
    pub version: Version,
}

#[derive(Debug, Serialize)]
pub struct VersionsResponse {
    pub versions: Vec<VersionSummary>,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/validate?subdomain=&invitationId=
///
/// Always 200 for a well-formed request; unavailability is reported in the
/// body with a reason string.
pub async fn validate_subdomain(
    State(state): State<AppState>,
    Query(params): Query<ValidateQuery>,
) -> AppResult<Json<SubdomainCheck>> {
    let candidate = params.subdomain.as_deref().unwrap_or_default();
    let invitation_id = params
        .invitation_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());

    let check = state
        .publisher
        .validate_subdomain(invitation_id, candidate)
        .await?;
    Ok(Json(check))
}

/// POST /api/v1/publish
///
/// Render the invitation and publish it as the next version.
pub async fn publish(
    State(state): State<AppState>,
    Json(input): Json<PublishRequest>,
) -> AppResult<Json<PublishOutcome>> {
    let invitation_id = required(&input.invitation_id, "invitationId")?;
    let subdomain = required(&input.subdomain, "subdomain")?;

    let outcome = state.publisher.publish(invitation_id, subdomain).await?;
    Ok(Json(outcome))
}

/// GET /api/v1/versions?subdomain=
pub async fn list_versions(
    State(state): State<AppState>,
    Query(params): Query<SubdomainQuery>,
) -> AppResult<Json<VersionsResponse>> {
    let subdomain = required(&params.subdomain, "subdomain")?;
    let versions = state.publisher.list_versions(subdomain).await?;
    Ok(Json(VersionsResponse { versions }))
}

/// POST /api/v1/rollback
///
/// Pointer-only: no re-render, no new history entry.
pub async fn rollback(
    State(state): State<AppState>,
    Json(input): Json<RollbackRequest>,
) -> AppResult<Json<OkResponse>> {
    let subdomain = required(&input.subdomain, "subdomain")?;
    state.publisher.rollback(subdomain, input.version).await?;
    Ok(Json(OkResponse { ok: true }))
}
