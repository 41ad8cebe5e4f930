use vows_core::error::CoreError;
use vows_core::types::Version;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Create-if-absent found an existing object at `key`.
    #[error("object already exists: {0}")]
    AlreadyExists(String),

    #[error("object not found: {0}")]
    NotFound(String),

    #[error("version {version} of '{subdomain}' already has content")]
    VersionConflict { subdomain: String, version: Version },

    #[error("invalid bundle: {0}")]
    InvalidBundle(String),

    #[error("store operation timed out: {0}")]
    Timeout(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("manifest encoding error: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether the failure is worth retrying for an idempotent read.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Timeout(_) | StoreError::Unavailable(_) | StoreError::Io(_))
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(key) => CoreError::NotFound {
                entity: "SiteObject",
                id: key,
            },
            StoreError::VersionConflict { subdomain, version } => {
                CoreError::VersionConflict { subdomain, version }
            }
            StoreError::InvalidBundle(msg) => CoreError::RenderFailure(msg),
            other @ (StoreError::Timeout(_) | StoreError::Unavailable(_) | StoreError::Io(_)) => {
                CoreError::Unavailable(other.to_string())
            }
            other @ (StoreError::AlreadyExists(_) | StoreError::Manifest(_)) => {
                CoreError::Internal(other.to_string())
            }
        }
    }
}
