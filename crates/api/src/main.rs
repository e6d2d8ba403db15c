//! Data-Point Ingestion Service - Main Entry Point

use api::{config::ServiceConfig, init_logging, run_server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::from_env()?;
    init_logging(&config.log_level);

    info!("=== Data-Point Ingestion Service v{} ===", env!("CARGO_PKG_VERSION"));

    run_server(config).await?;

    Ok(())
}
