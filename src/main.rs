use std::sync::Arc;

use todo_sync::config::Config;
use todo_sync::http::routes::{directory, todos};
use todo_sync::http::routing;
use todo_sync::infrastructure::fixtures::Directory;
use todo_sync::infrastructure::memory_store::{MemoryStore, SEED_TITLES};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    let store = Arc::new(
        MemoryStore::seeded(SEED_TITLES)
            .with_latency(config.latency)
            .with_faults(config.faults),
    );
    let directory = Arc::new(Directory::generate());

    let todos_router = todos::router(todos::AppState { store });
    let router = routing::app(todos_router.merge(directory::router(directory)));

    tracing::info!(addr = %config.bind_addr, latency = ?config.latency, faults = ?config.faults, "listening");
    axum::serve(tokio::net::TcpListener::bind(config.bind_addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
