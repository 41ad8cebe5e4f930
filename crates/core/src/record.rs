//! Publish record: the authoritative per-subdomain publish state.

use serde::{Deserialize, Serialize};

use crate::types::{Timestamp, Version};

/// One entry of a subdomain's append-only publish history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionEntry {
    pub version: Version,
    pub created_at: Timestamp,
}

/// Publish state of one claimed subdomain.
///
/// Invariants:
/// - `current_version` is `0` or the version of an entry in `published_versions`.
/// - `published_versions` is strictly increasing by `version`.
/// - `last_assigned_version >= max(published_versions)`; numbers up to it are
///   never handed out again, even when the publish that reserved them failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRecord {
    pub subdomain: String,
    pub invitation_id: String,
    pub current_version: Version,
    pub last_assigned_version: Version,
    pub published_versions: Vec<VersionEntry>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PublishRecord {
    /// A freshly claimed, never published record.
    pub fn claimed(subdomain: &str, invitation_id: &str, now: Timestamp) -> Self {
        Self {
            subdomain: subdomain.to_string(),
            invitation_id: invitation_id.to_string(),
            current_version: 0,
            last_assigned_version: 0,
            published_versions: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// `true` once a version has been made current.
    pub fn is_published(&self) -> bool {
        self.current_version > 0
    }

    pub fn has_version(&self, version: Version) -> bool {
        self.published_versions.iter().any(|e| e.version == version)
    }

    /// Highest successfully published version, or `0`.
    pub fn latest_version(&self) -> Version {
        self.published_versions
            .iter()
            .map(|e| e.version)
            .max()
            .unwrap_or(0)
    }

    /// Next number to reserve for a publish.
    pub fn next_version(&self) -> Version {
        self.last_assigned_version.max(self.latest_version()) + 1
    }

    /// Publish history, newest first.
    pub fn history(&self) -> Vec<VersionSummary> {
        let mut summaries: Vec<VersionSummary> = self
            .published_versions
            .iter()
            .map(|e| VersionSummary {
                version: e.version,
                is_current: e.version == self.current_version,
                created_at: e.created_at,
            })
            .collect();
        summaries.sort_by(|a, b| b.version.cmp(&a.version));
        summaries
    }
}

/// History row shown to operators and users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSummary {
    pub version: Version,
    pub is_current: bool,
    pub created_at: Timestamp,
}

/// Edge-facing publish state of a subdomain (the resolve contract).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSite {
    pub subdomain: String,
    pub published: bool,
    pub current_version: Version,
}

impl ResolvedSite {
    /// State reported for subdomains with no record.
    pub fn unpublished(subdomain: &str) -> Self {
        Self {
            subdomain: subdomain.to_string(),
            published: false,
            current_version: 0,
        }
    }

    /// Whether the edge may serve content for this site.
    pub fn is_servable(&self) -> bool {
        self.published && self.current_version > 0
    }
}

impl From<&PublishRecord> for ResolvedSite {
    fn from(record: &PublishRecord) -> Self {
        Self {
            subdomain: record.subdomain.clone(),
            published: record.is_published(),
            current_version: record.current_version,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn record_with(versions: &[Version], current: Version) -> PublishRecord {
        let now = Utc::now();
        let mut record = PublishRecord::claimed("john-wedding", "inv-1", now);
        record.published_versions = versions
            .iter()
            .map(|&version| VersionEntry {
                version,
                created_at: now,
            })
            .collect();
        record.last_assigned_version = versions.iter().copied().max().unwrap_or(0);
        record.current_version = current;
        record
    }

    #[test]
    fn claimed_record_is_unpublished() {
        let record = record_with(&[], 0);
        assert!(!record.is_published());
        assert_eq!(record.next_version(), 1);
        assert!(!ResolvedSite::from(&record).is_servable());
    }

    #[test]
    fn next_version_skips_burned_numbers() {
        let mut record = record_with(&[1, 2], 2);
        record.last_assigned_version = 4;
        assert_eq!(record.next_version(), 5);
    }

    #[test]
    fn history_is_newest_first_with_current_flag() {
        let record = record_with(&[1, 2, 3], 2);
        let history = record.history();
        let versions: Vec<_> = history.iter().map(|s| s.version).collect();
        assert_eq!(versions, vec![3, 2, 1]);
        assert!(history[1].is_current);
        assert!(!history[0].is_current);
    }

    #[test]
    fn resolved_site_serializes_camel_case() {
        let record = record_with(&[1], 1);
        let json = serde_json::to_value(ResolvedSite::from(&record)).unwrap();
        assert_eq!(json["currentVersion"], 1);
        assert_eq!(json["published"], true);
        assert_eq!(json["subdomain"], "john-wedding");
    }
}
