//! # postshortly
//!
//! Registration-free status update node.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use node_runtime::{NodeConfig, NodeRuntime};

/// Registration-free status updates signed with Ed25519 keys.
#[derive(Debug, Parser)]
#[command(name = "postshortly", version, about)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = NodeConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let _telemetry = ps_telemetry::init_telemetry(config.telemetry.clone())
        .context("Failed to initialize telemetry")?;

    info!("===========================================");
    info!("  {} v{}", config.telemetry.service_name, env!("CARGO_PKG_VERSION"));
    info!("===========================================");
    info!("HTTP: {}", config.gateway.http_addr());
    info!("Storage: {:?} at {:?}", config.storage.backend, config.storage.data_dir);

    let runtime = NodeRuntime::new(config).context("Failed to start node runtime")?;
    runtime.run().await?;

    Ok(())
}
