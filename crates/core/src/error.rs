use crate::types::Version;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid subdomain: {0}")]
    InvalidSubdomain(String),

    #[error("Subdomain unavailable: {0}")]
    SubdomainUnavailable(String),

    #[error("Unknown layout: {0}")]
    UnknownLayout(String),

    #[error("Render failed: {0}")]
    RenderFailure(String),

    #[error("Version conflict: {subdomain} v{version} already has content")]
    VersionConflict { subdomain: String, version: Version },

    #[error("Unknown version: {subdomain} has no published v{version}")]
    UnknownVersion { subdomain: String, version: Version },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A transient store or network failure. Idempotent reads may retry these.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether a retry of the same idempotent operation could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, CoreError::Unavailable(_))
    }
}
