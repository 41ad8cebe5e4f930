use std::path::PathBuf;
use std::sync::Arc;

use crate::backend::{LocalObjectStore, MemoryObjectStore, ObjectStore, S3ObjectStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackendKind {
    Local,
    S3,
    Memory,
}

impl StorageBackendKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "local" => Some(Self::Local),
            "s3" => Some(Self::S3),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Object store configuration shared by the API and edge binaries.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackendKind,
    /// Root directory for the local backend.
    pub path: PathBuf,
    /// Bucket for the S3 backend.
    pub s3_bucket: Option<String>,
    /// Key prefix inside the bucket (default: none).
    pub s3_prefix: String,
}

impl StorageConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var           | Default        |
    /// |-------------------|----------------|
    /// | `STORAGE_BACKEND` | `local`        |
    /// | `STORAGE_PATH`    | `./data`       |
    /// | `S3_BUCKET`       | (required for `s3`) |
    /// | `S3_PREFIX`       | empty          |
    pub fn from_env() -> Self {
        let backend_name = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "local".into());
        let backend = StorageBackendKind::from_name(&backend_name).unwrap_or_else(|| {
            panic!("STORAGE_BACKEND must be local, s3 or memory, got '{backend_name}'")
        });

        let path = std::env::var("STORAGE_PATH")
            .unwrap_or_else(|_| "./data".into())
            .into();

        let s3_bucket = std::env::var("S3_BUCKET").ok().filter(|b| !b.trim().is_empty());
        if backend == StorageBackendKind::S3 && s3_bucket.is_none() {
            panic!("S3_BUCKET must be set when STORAGE_BACKEND=s3");
        }

        let s3_prefix = std::env::var("S3_PREFIX").unwrap_or_default();

        Self {
            backend,
            path,
            s3_bucket,
            s3_prefix,
        }
    }
}

/// Construct the configured backend.
pub async fn build_object_store(config: &StorageConfig) -> Arc<dyn ObjectStore> {
    match config.backend {
        StorageBackendKind::Local => Arc::new(LocalObjectStore::new(config.path.clone())),
        StorageBackendKind::Memory => Arc::new(MemoryObjectStore::new()),
        StorageBackendKind::S3 => {
            let bucket = config.s3_bucket.clone().unwrap_or_default();
            Arc::new(S3ObjectStore::from_env(bucket, config.s3_prefix.clone()).await)
        }
    }
}
