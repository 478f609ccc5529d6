use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use salesboard::{ingest, server, DuckDbStore, SalesService, SalesboardConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SalesboardConfig::load_default();

    let store = Arc::new(DuckDbStore::open(&config.database.path)?);
    let service = Arc::new(SalesService::new(store.clone()));

    // Serving starts immediately; the one-time import runs in the
    // background and only logs on failure.
    if let Some(csv_path) = config.ingest.csv_path.clone() {
        let store = store.clone();
        tokio::spawn(async move {
            if let Err(err) = ingest::import_csv_if_needed(&store, &csv_path).await {
                tracing::error!(error = %err, "csv import failed");
            }
        });
    }

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.server.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "salesboard server listening");

    axum::serve(listener, server::router(service)).await?;
    Ok(())
}
