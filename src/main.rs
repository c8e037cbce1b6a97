//! Film Catalog server
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Load configuration from environment variables
//! 3. Connect to the store (schema applied on connect)
//! 4. Populate the cache once, bounded by `WARMUP_TIMEOUT`
//! 5. Start background expired-entry sweeper
//! 6. Serve HTTP until SIGINT/SIGTERM

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use film_catalog::{
    api::create_router, cache::new_shared_cache, spawn_cleanup_task, AppState, Config,
    StartupPopulator, Store,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "film_catalog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Film Catalog server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: films_list_ttl={}s, film_detail_ttl={}s, port={}, cleanup_interval={}s",
        config.films_list_ttl, config.film_detail_ttl, config.server_port, config.cleanup_interval
    );

    let store = Store::connect(&config.database_url, config.database_max_connections)
        .await
        .with_context(|| format!("opening store at {}", config.database_url))?;

    // Populate only once the store is confirmed ready
    let cache = new_shared_cache();
    let policy = config.cache_policy();
    StartupPopulator::new(
        store.clone(),
        cache.clone(),
        policy,
        Duration::from_secs(config.warmup_timeout),
    )
    .run()
    .await;

    let cleanup_handle = spawn_cleanup_task(cache.clone(), config.cleanup_interval);

    let app = create_router(AppState::new(store.clone(), cache, policy));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("serving HTTP")?;

    store.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the sweeper.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cleanup_handle.abort();
    warn!("Cache sweeper aborted");
}
