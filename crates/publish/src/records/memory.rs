use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use vows_core::error::CoreError;
use vows_core::record::{PublishRecord, VersionEntry};
use vows_core::types::Version;

use super::{record_not_found, RecordStore};

/// Process-local record store for tests and single-node development.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<String, PublishRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn find(&self, subdomain: &str) -> Result<Option<PublishRecord>, CoreError> {
        Ok(self.records.read().await.get(subdomain).cloned())
    }

    async fn claim(
        &self,
        subdomain: &str,
        invitation_id: &str,
    ) -> Result<PublishRecord, CoreError> {
        let mut records = self.records.write().await;
        let record = records
            .entry(subdomain.to_string())
            .or_insert_with(|| PublishRecord::claimed(subdomain, invitation_id, Utc::now()));
        Ok(record.clone())
    }

    async fn reserve_version(&self, subdomain: &str) -> Result<Version, CoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(subdomain)
            .ok_or_else(|| record_not_found(subdomain))?;

        let version = record.next_version();
        record.last_assigned_version = version;
        record.updated_at = Utc::now();
        Ok(version)
    }

    async fn commit_version(
        &self,
        subdomain: &str,
        version: Version,
    ) -> Result<PublishRecord, CoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(subdomain)
            .ok_or_else(|| record_not_found(subdomain))?;

        if version > record.last_assigned_version || version <= record.latest_version() {
            return Err(CoreError::Internal(format!(
                "{subdomain} v{version} cannot be committed \
                 (last assigned {}, latest published {})",
                record.last_assigned_version,
                record.latest_version(),
            )));
        }

        let now = Utc::now();
        record.published_versions.push(VersionEntry {
            version,
            created_at: now,
        });
        record.current_version = version;
        record.updated_at = now;
        Ok(record.clone())
    }

    async fn set_current(&self, subdomain: &str, version: Version) -> Result<(), CoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(subdomain)
            .filter(|r| r.has_version(version))
            .ok_or_else(|| CoreError::UnknownVersion {
                subdomain: subdomain.to_string(),
                version,
            })?;

        record.current_version = version;
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn ping(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn claim_keeps_first_owner() {
        let store = MemoryRecordStore::new();
        store.claim("john-wedding", "inv-1").await.unwrap();
        let again = store.claim("john-wedding", "inv-2").await.unwrap();
        assert_eq!(again.invitation_id, "inv-1");
    }

    #[tokio::test]
    async fn reserved_numbers_are_never_reused() {
        let store = MemoryRecordStore::new();
        store.claim("john-wedding", "inv-1").await.unwrap();

        assert_eq!(store.reserve_version("john-wedding").await.unwrap(), 1);
        // v1 never committed.
        assert_eq!(store.reserve_version("john-wedding").await.unwrap(), 2);
        let record = store.commit_version("john-wedding", 2).await.unwrap();
        assert_eq!(record.current_version, 2);

        assert_eq!(store.reserve_version("john-wedding").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn commit_requires_reservation() {
        let store = MemoryRecordStore::new();
        store.claim("john-wedding", "inv-1").await.unwrap();
        assert_matches!(
            store.commit_version("john-wedding", 1).await,
            Err(CoreError::Internal(_))
        );
        assert_matches!(
            store.reserve_version("missing").await,
            Err(CoreError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn set_current_rejects_unknown_versions() {
        let store = MemoryRecordStore::new();
        store.claim("john-wedding", "inv-1").await.unwrap();
        let v = store.reserve_version("john-wedding").await.unwrap();
        store.commit_version("john-wedding", v).await.unwrap();

        assert_matches!(
            store.set_current("john-wedding", 9).await,
            Err(CoreError::UnknownVersion { version: 9, .. })
        );
        store.set_current("john-wedding", 1).await.unwrap();
    }
}
