//! The publish orchestrator: validate, publish, list, roll back, resolve.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use vows_core::error::CoreError;
use vows_core::record::{PublishRecord, ResolvedSite, VersionSummary};
use vows_core::subdomain::{self, SubdomainCheck, UnavailableReason};
use vows_core::types::Version;
use vows_render::{RenderInput, SiteRenderer};
use vows_storage::{SiteFile, StoreError, VersionStore};

use crate::invitations::{InvitationSnapshot, InvitationSource};
use crate::locks::SubdomainLocks;
use crate::records::RecordStore;
use crate::retry::{retry_read, RetryPolicy};

// ---------------------------------------------------------------------------
// Configuration / results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Sites are served at `{scheme}://{subdomain}.{base_domain}`.
    pub base_domain: String,
    pub scheme: String,
    /// Retry policy for idempotent reads (validate, list, resolve).
    pub retry: RetryPolicy,
}

impl PublisherConfig {
    pub fn new(base_domain: impl Into<String>) -> Self {
        Self {
            base_domain: base_domain.into(),
            scheme: "https".to_string(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn site_url(&self, subdomain: &str) -> String {
        format!("{}://{subdomain}.{}", self.scheme, self.base_domain)
    }
}

/// Result of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishOutcome {
    pub url: String,
    pub version: Version,
    pub subdomain: String,
}

// ---------------------------------------------------------------------------
// Publisher
// ---------------------------------------------------------------------------

/// Coordinates the renderer, the version store and the record store.
///
/// Publishes and rollbacks are serialized per subdomain; everything else
/// runs concurrently.
pub struct Publisher {
    records: Arc<dyn RecordStore>,
    invitations: Arc<dyn InvitationSource>,
    store: VersionStore,
    renderer: Arc<SiteRenderer>,
    locks: SubdomainLocks,
    config: PublisherConfig,
}

impl Publisher {
    pub fn new(
        records: Arc<dyn RecordStore>,
        invitations: Arc<dyn InvitationSource>,
        store: VersionStore,
        renderer: Arc<SiteRenderer>,
        config: PublisherConfig,
    ) -> Self {
        Self {
            records,
            invitations,
            store,
            renderer,
            locks: SubdomainLocks::new(),
            config,
        }
    }

    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }

    pub fn store(&self) -> &VersionStore {
        &self.store
    }

    /// Normalize `candidate` and report whether `invitation_id` may use it.
    ///
    /// A name already claimed by the same invitation is available (re-publish).
    /// Without an invitation id, any existing claim makes it unavailable.
    pub async fn validate_subdomain(
        &self,
        invitation_id: Option<&str>,
        candidate: &str,
    ) -> Result<SubdomainCheck, CoreError> {
        let normalized = subdomain::normalize(candidate);
        if let Err(reason) = subdomain::check_format(&normalized) {
            return Ok(SubdomainCheck::unavailable(normalized, &reason));
        }

        let record = self.find_record(&normalized).await?;
        let check = match record {
            Some(r) if invitation_id != Some(r.invitation_id.as_str()) => {
                SubdomainCheck::unavailable(normalized, &UnavailableReason::ClaimedByOther)
            }
            _ => SubdomainCheck::available(normalized),
        };
        Ok(check)
    }

    /// Render the invitation and publish it as the next version of the site.
    ///
    /// The record is only advanced after every file is stored. Render
    /// failures leave the record untouched; storage failures burn the
    /// reserved number and are never retried here.
    pub async fn publish(
        &self,
        invitation_id: &str,
        candidate: &str,
    ) -> Result<PublishOutcome, CoreError> {
        if invitation_id.trim().is_empty() {
            return Err(CoreError::Validation("invitationId is required".to_string()));
        }
        let subdomain = normalized_subdomain(candidate)?;

        let _guard = self.locks.acquire(&subdomain).await;

        if let Some(record) = self.records.find(&subdomain).await? {
            ensure_owner(&record, invitation_id)?;
        }

        let snapshot = self.invitations.load(invitation_id).await?;
        let files = self.render(snapshot).await?;

        let record = self.records.claim(&subdomain, invitation_id).await?;
        ensure_owner(&record, invitation_id)?;

        let version = self.records.reserve_version(&subdomain).await?;

        if let Err(e) = self.store.put_version(&subdomain, version, files).await {
            match &e {
                StoreError::VersionConflict { .. } => tracing::error!(
                    subdomain = %subdomain,
                    version,
                    "Reserved version already has content in the store",
                ),
                _ => tracing::warn!(
                    subdomain = %subdomain,
                    version,
                    error = %e,
                    "Publish aborted, version number burned",
                ),
            }
            return Err(e.into());
        }

        let record = self.records.commit_version(&subdomain, version).await?;

        tracing::info!(
            subdomain = %subdomain,
            invitation_id,
            version,
            history = record.published_versions.len(),
            "Published site version",
        );

        Ok(PublishOutcome {
            url: self.config.site_url(&subdomain),
            version,
            subdomain,
        })
    }

    /// Publish history, newest first.
    pub async fn list_versions(&self, candidate: &str) -> Result<Vec<VersionSummary>, CoreError> {
        let subdomain = normalized_subdomain(candidate)?;
        let record = self
            .find_record(&subdomain)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "PublishRecord",
                id: subdomain.clone(),
            })?;
        Ok(record.history())
    }

    /// Point the site back at an already published version. No re-render.
    pub async fn rollback(&self, candidate: &str, target: Version) -> Result<(), CoreError> {
        let subdomain = normalized_subdomain(candidate)?;

        let _guard = self.locks.acquire(&subdomain).await;

        let record = self
            .records
            .find(&subdomain)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "PublishRecord",
                id: subdomain.clone(),
            })?;
        if !record.has_version(target) {
            return Err(CoreError::UnknownVersion {
                subdomain,
                version: target,
            });
        }

        self.records.set_current(&subdomain, target).await?;

        tracing::info!(
            subdomain = %subdomain,
            from = record.current_version,
            to = target,
            "Rolled back site",
        );
        Ok(())
    }

    /// Edge-facing publish state. Unknown or malformed names are unpublished.
    pub async fn resolve(&self, candidate: &str) -> Result<ResolvedSite, CoreError> {
        let normalized = subdomain::normalize(candidate);
        if !subdomain::is_valid(&normalized) {
            return Ok(ResolvedSite::unpublished(&normalized));
        }

        let resolved = match self.find_record(&normalized).await? {
            Some(record) => ResolvedSite::from(&record),
            None => ResolvedSite::unpublished(&normalized),
        };
        Ok(resolved)
    }

    /// Reachability of the record store.
    pub async fn ping(&self) -> Result<(), CoreError> {
        self.records.ping().await
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    async fn find_record(&self, subdomain: &str) -> Result<Option<PublishRecord>, CoreError> {
        let records = &self.records;
        retry_read(&self.config.retry, "find_record", move || {
            records.find(subdomain)
        })
        .await
    }

    /// Render on the blocking pool and convert to storable files.
    async fn render(
        &self,
        snapshot: InvitationSnapshot,
    ) -> Result<BTreeMap<String, SiteFile>, CoreError> {
        let renderer = Arc::clone(&self.renderer);
        let bundle = tokio::task::spawn_blocking(move || {
            renderer.render(RenderInput {
                data: &snapshot.data,
                layout_id: &snapshot.layout_id,
                layout_config: &snapshot.layout_config,
                translations: &snapshot.translations,
            })
        })
        .await
        .map_err(|e| CoreError::Internal(format!("render task failed: {e}")))??;

        Ok(bundle
            .into_files()
            .map(|(path, file)| {
                (
                    path,
                    SiteFile {
                        content_type: file.content_type.to_string(),
                        bytes: file.bytes,
                    },
                )
            })
            .collect())
    }
}

fn normalized_subdomain(candidate: &str) -> Result<String, CoreError> {
    let normalized = subdomain::normalize(candidate);
    subdomain::check_format(&normalized).map_err(|reason| reason.into_error(&normalized))?;
    Ok(normalized)
}

fn ensure_owner(record: &PublishRecord, invitation_id: &str) -> Result<(), CoreError> {
    if record.invitation_id != invitation_id {
        return Err(UnavailableReason::ClaimedByOther.into_error(&record.subdomain));
    }
    Ok(())
}
