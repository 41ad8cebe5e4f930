//! Publish record and publish history models.

use serde::Serialize;
use sqlx::FromRow;
use vows_core::record::{PublishRecord, VersionEntry};
use vows_core::types::{Timestamp, Version};

/// A row from the `publish_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublishRecordRow {
    pub subdomain: String,
    pub invitation_id: String,
    pub current_version: Version,
    pub last_assigned_version: Version,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `published_versions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublishedVersionRow {
    pub subdomain: String,
    pub version: Version,
    pub created_at: Timestamp,
}

impl PublishRecordRow {
    /// Combine the record row with its history rows (any order).
    pub fn into_record(self, mut versions: Vec<PublishedVersionRow>) -> PublishRecord {
        versions.sort_by_key(|v| v.version);
        PublishRecord {
            subdomain: self.subdomain,
            invitation_id: self.invitation_id,
            current_version: self.current_version,
            last_assigned_version: self.last_assigned_version,
            published_versions: versions.into_iter().map(VersionEntry::from).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<PublishedVersionRow> for VersionEntry {
    fn from(row: PublishedVersionRow) -> Self {
        Self {
            version: row.version,
            created_at: row.created_at,
        }
    }
}
