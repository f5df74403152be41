//! Tutor Server Binary

use anyhow::{anyhow, Result};
use tutor_common_log::LogConfig;
use tutor_server::{config, Server};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = config::load_config()?;

    let log_config = LogConfig::new(&config.logging.level, &config.logging.format).with_env_overrides();
    tutor_common_log::init(&log_config)?;

    if let Err(errors) = config::validate_config(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        return Err(anyhow!("configuration has {} error(s)", errors.len()));
    }

    info!("Starting Tutor Server v{}", env!("CARGO_PKG_VERSION"));

    Server::new(config).run().await?;

    info!("Server shutdown complete");
    Ok(())
}
