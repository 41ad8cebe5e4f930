use std::sync::Arc;

use vows_storage::VersionStore;

use crate::config::EdgeConfig;
use crate::resolver::Resolver;

/// Shared edge state; cheaply cloneable.
#[derive(Clone)]
pub struct EdgeState {
    pub config: Arc<EdgeConfig>,
    pub resolver: Arc<Resolver>,
    pub store: VersionStore,
}
