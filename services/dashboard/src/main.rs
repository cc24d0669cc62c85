use std::sync::Arc;

use anyhow::{Context, Result};
use docstore::{DocumentStore, FileBackedStore, MongoStore};
use tokio::net::TcpListener;
use tracing::{info, warn};

use dashboard::build_router;
use dashboard::config::{AppConfig, StoreBackend};
use dashboard::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env()?;

    // --- Document store ---
    let store: Arc<dyn DocumentStore> = match &cfg.store {
        StoreBackend::Files { dir } => {
            info!(dir = %dir.display(), "store: files");
            Arc::new(FileBackedStore::new(dir))
        }
        StoreBackend::Mongo { uri, database } => {
            info!(database = %database, "store: mongodb");
            Arc::new(
                MongoStore::connect(uri, database)
                    .await
                    .context("Failed to configure MongoDB client")?,
            )
        }
    };

    // --- Startup health check (fail fast) ---
    startup_checks(store.as_ref()).await?;

    let app_state = Arc::new(AppState::new(store, cfg.excluded_collections.clone()));
    let app = build_router(app_state);

    let listener = TcpListener::bind(&cfg.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", cfg.bind_addr))?;
    info!("dashboard listening on http://{}", cfg.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("dashboard stopped");
    Ok(())
}

async fn startup_checks(store: &dyn DocumentStore) -> Result<()> {
    let collections = store
        .list_collections()
        .await
        .context("Document store is not reachable")?;
    info!(collections = collections.len(), "store: ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
