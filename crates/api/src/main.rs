use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vows_api::config::ServerConfig;
use vows_api::router::build_app_router;
use vows_api::state::AppState;
use vows_publish::{PgInvitationSource, PgRecordStore, Publisher, PublisherConfig, RetryPolicy};
use vows_render::{LayoutRegistry, SiteRenderer};
use vows_storage::{build_object_store, StorageConfig, VersionStore};

/// Base delay for retried record reads.
const READ_RETRY_BASE_DELAY: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vows_api=debug,vows_publish=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        base_domain = %config.base_domain,
        "Loaded server configuration",
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = vows_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    vows_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database health check passed");

    vows_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    // --- Version store ---
    let storage_config = StorageConfig::from_env();
    let store = VersionStore::new(build_object_store(&storage_config).await);
    tracing::info!(backend = store.backend_name(), "Version store ready");

    // --- Renderer ---
    let registry = Arc::new(LayoutRegistry::builtin());
    tracing::info!(layouts = registry.len(), "Layout registry loaded");
    let renderer = Arc::new(SiteRenderer::new(registry, config.max_bundle_bytes));

    // --- Publisher ---
    let publisher_config = PublisherConfig {
        base_domain: config.base_domain.clone(),
        scheme: config.site_scheme.clone(),
        retry: RetryPolicy::new(config.read_retry_attempts, READ_RETRY_BASE_DELAY),
    };
    let publisher = Publisher::new(
        Arc::new(PgRecordStore::new(pool.clone())),
        Arc::new(PgInvitationSource::new(pool.clone())),
        store,
        renderer,
        publisher_config,
    );

    let state = AppState {
        config: Arc::new(config.clone()),
        publisher: Arc::new(publisher),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(config.host.parse().context("Invalid HOST")?, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
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
