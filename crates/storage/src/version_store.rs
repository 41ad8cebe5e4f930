use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use vows_core::site_path::{self, INDEX_DOCUMENT};
use vows_core::subdomain;
use vows_core::types::Version;

use crate::backend::{ObjectStore, StoredObject};
use crate::error::StoreError;
use crate::manifest::{Manifest, ManifestEntry};

/// One file of a version to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteFile {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Versioned, write-once access to site bundles over any [`ObjectStore`].
///
/// Cheaply cloneable.
#[derive(Clone)]
pub struct VersionStore {
    backend: Arc<dyn ObjectStore>,
}

impl VersionStore {
    pub fn new(backend: Arc<dyn ObjectStore>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Store every file of `version` for `subdomain`.
    ///
    /// The manifest is created first and acts as the claim: if it already
    /// exists the call fails with [`StoreError::VersionConflict`] and nothing
    /// is written. If any file write then fails, the files written by this
    /// call are removed (best effort) and the error is returned; the claim
    /// stays, so the version number is never reused.
    pub async fn put_version(
        &self,
        subdomain: &str,
        version: Version,
        files: BTreeMap<String, SiteFile>,
    ) -> Result<Manifest, StoreError> {
        validate_bundle(subdomain, version, &files)?;

        let manifest = Manifest {
            subdomain: subdomain.to_string(),
            version,
            created_at: chrono::Utc::now(),
            files: files
                .iter()
                .map(|(path, file)| ManifestEntry::describe(path, &file.content_type, &file.bytes))
                .collect(),
        };

        let manifest_key = site_path::manifest_key(subdomain, version);
        let manifest_bytes = serde_json::to_vec_pretty(&manifest)?;
        match self
            .backend
            .put_if_absent(&manifest_key, manifest_bytes, "application/json")
            .await
        {
            Ok(()) => {}
            Err(StoreError::AlreadyExists(_)) => {
                tracing::error!(subdomain, version, "Version already claimed");
                return Err(StoreError::VersionConflict {
                    subdomain: subdomain.to_string(),
                    version,
                });
            }
            Err(e) => return Err(e),
        }

        let keys: Vec<String> = files
            .keys()
            .map(|path| site_path::object_key(subdomain, version, path))
            .collect();
        let writes = files.into_values().zip(&keys).map(|(file, key)| {
            let backend = Arc::clone(&self.backend);
            async move {
                backend
                    .put_if_absent(key, file.bytes, &file.content_type)
                    .await
            }
        });
        let results = join_all(writes).await;

        let mut first_error = None;
        let mut written = Vec::new();
        for (key, result) in keys.iter().zip(results) {
            match result {
                Ok(()) => written.push(key),
                Err(e) => {
                    tracing::warn!(
                        subdomain,
                        version,
                        key = %key,
                        error = %e,
                        "Site file write failed",
                    );
                    first_error.get_or_insert(e);
                }
            }
        }

        if let Some(err) = first_error {
            for key in written {
                if let Err(e) = self.backend.delete(key).await {
                    tracing::warn!(
                        key = %key,
                        error = %e,
                        "Failed to clean up partial version file",
                    );
                }
            }
            return Err(match err {
                StoreError::AlreadyExists(_) => StoreError::VersionConflict {
                    subdomain: subdomain.to_string(),
                    version,
                },
                other => other,
            });
        }

        tracing::info!(
            subdomain,
            version,
            backend = self.backend.name(),
            files = manifest.files.len(),
            bytes = manifest.total_bytes(),
            "Stored site version",
        );
        Ok(manifest)
    }

    /// Fetch one file of a version. `path` is a request path and is
    /// normalized with the directory-index convention first.
    pub async fn get_object(
        &self,
        subdomain: &str,
        version: Version,
        path: &str,
    ) -> Result<StoredObject, StoreError> {
        let normalized = site_path::normalize_path(path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        let key = site_path::object_key(subdomain, version, &normalized);
        let object = self.backend.get(&key).await?;
        object.ok_or(StoreError::NotFound(key))
    }

    /// Read a version's manifest, if the version was ever claimed.
    pub async fn manifest(
        &self,
        subdomain: &str,
        version: Version,
    ) -> Result<Option<Manifest>, StoreError> {
        let key = site_path::manifest_key(subdomain, version);
        match self.backend.get(&key).await? {
            Some(obj) => Ok(Some(serde_json::from_slice(&obj.bytes)?)),
            None => Ok(None),
        }
    }
}

fn validate_bundle(
    subdomain: &str,
    version: Version,
    files: &BTreeMap<String, SiteFile>,
) -> Result<(), StoreError> {
    if !subdomain::is_valid(subdomain) {
        return Err(StoreError::InvalidBundle(format!(
            "'{subdomain}' is not a valid subdomain"
        )));
    }
    if version < 1 {
        return Err(StoreError::InvalidBundle(format!(
            "version must be positive, got {version}"
        )));
    }
    if !files.contains_key(INDEX_DOCUMENT) {
        return Err(StoreError::InvalidBundle(format!(
            "bundle has no {INDEX_DOCUMENT}"
        )));
    }
    for path in files.keys() {
        if site_path::normalize_path(path).as_deref() != Some(path.as_str()) {
            return Err(StoreError::InvalidBundle(format!(
                "bundle path '{path}' is not a normalized file path"
            )));
        }
    }
    Ok(())
}
