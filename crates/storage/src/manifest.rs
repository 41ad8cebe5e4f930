use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use vows_core::types::{Timestamp, Version};

/// Per-version file listing, stored at `sites/{sub}/v{N}/.manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub subdomain: String,
    pub version: Version,
    pub created_at: Timestamp,
    pub files: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub path: String,
    pub content_type: String,
    pub size: u64,
    pub sha256: String,
}

impl ManifestEntry {
    pub fn describe(path: &str, content_type: &str, bytes: &[u8]) -> Self {
        Self {
            path: path.to_string(),
            content_type: content_type.to_string(),
            size: bytes.len() as u64,
            sha256: sha256_hex(bytes),
        }
    }
}

impl Manifest {
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

/// Lowercase hex SHA-256 digest.
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
