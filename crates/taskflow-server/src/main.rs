//! TaskFlow Server

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use taskflow_engine::{FileTaskStore, InMemoryTaskStore, TaskEngine, TaskStore};
use taskflow_server::config::Cli;
use taskflow_server::{create_router, AppState, Config, StoreBackend};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load config
    let config = Config::from_cli(Cli::parse());

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let http_addr: SocketAddr = config.bind_addr.parse()?;

    // Select the task store
    let store: Arc<dyn TaskStore> = match config.store {
        StoreBackend::Memory => {
            info!("Using in-memory task store");
            Arc::new(InMemoryTaskStore::new())
        }
        StoreBackend::File => {
            info!(data_dir = %config.data_dir.display(), "Using file task store");
            Arc::new(FileTaskStore::open(&config.data_dir).await?)
        }
    };

    let engine = TaskEngine::with_builtins(store);
    let types = engine.list_registered_types().await;
    info!(executor_types = types.len(), "Executor registry ready");

    // Create shared state and router
    let state = AppState::new(engine);
    let http_router = create_router(state);

    let http_listener = TcpListener::bind(http_addr).await?;
    info!("HTTP server listening on {}", http_addr);

    axum::serve(http_listener, http_router).await?;

    Ok(())
}
