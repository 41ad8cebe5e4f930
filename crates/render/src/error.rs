use vows_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("layout '{0}' is not registered")]
    UnknownLayout(String),

    #[error("rendered bundle is {size} bytes, exceeding the {limit} byte limit")]
    BundleTooLarge { size: usize, limit: usize },
}

impl From<RenderError> for CoreError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::UnknownLayout(id) => CoreError::UnknownLayout(id),
            other @ RenderError::BundleTooLarge { .. } => {
                CoreError::RenderFailure(other.to_string())
            }
        }
    }
}
