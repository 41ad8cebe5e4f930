use std::sync::Arc;

use vows_publish::Publisher;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything lives behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Publish orchestrator over the record store, invitation source,
    /// renderer and version store.
    pub publisher: Arc<Publisher>,
}
