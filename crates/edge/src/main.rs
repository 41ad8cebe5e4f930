use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vows_edge::config::EdgeConfig;
use vows_edge::resolver::{HttpResolveSource, Resolver};
use vows_edge::router::build_edge_router;
use vows_edge::state::EdgeState;
use vows_storage::{build_object_store, StorageConfig, VersionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vows_edge=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = EdgeConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        base_domain = %config.base_domain,
        resolve_url = %config.resolve_url,
        cache_ttl = ?config.resolve_cache.ttl,
        "Loaded edge configuration",
    );

    // --- Resolver ---
    let source = HttpResolveSource::new(config.resolve_url.clone(), config.resolve_timeout)
        .context("Failed to build resolve client")?;
    let resolver = Resolver::new(
        config.base_domain.clone(),
        Arc::new(source),
        config.resolve_cache,
        config.resolve_timeout,
    );

    // --- Version store ---
    let storage_config = StorageConfig::from_env();
    let store = VersionStore::new(build_object_store(&storage_config).await);
    tracing::info!(backend = store.backend_name(), "Version store ready");

    let addr = SocketAddr::new(config.host.parse().context("Invalid EDGE_HOST")?, config.port);

    let state = EdgeState {
        config: Arc::new(config),
        resolver: Arc::new(resolver),
        store,
    };
    let app = build_edge_router(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting edge server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Edge server stopped");
    Ok(())
}

/// Wait for Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
