use anyhow::Context;
use orangecoin::api::{self, AppState};
use orangecoin::config::Config;
use orangecoin::host::{FileStore, LedgerHost, MemoryStore, StateStore};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.is_production() {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!("Starting OrangeCoin ledger");
    tracing::info!("Environment: {}", config.server.environment);
    tracing::info!("Deployer: {}", config.ledger.deployer);

    let store: Arc<dyn StateStore> = match &config.ledger.state_path {
        Some(path) => {
            tracing::info!("Ledger state file: {}", path.display());
            Arc::new(FileStore::new(path))
        }
        None => {
            tracing::warn!("ORANGECOIN_STATE_PATH not set, ledger state will not survive restarts");
            Arc::new(MemoryStore::new())
        }
    };

    let host = LedgerHost::open(store, config.ledger.deployer.clone())
        .await
        .context("failed to open ledger state")?;

    let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.server.host, config.server.port))?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    let app = api::router(AppState::new(config, host));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
