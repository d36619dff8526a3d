//! # postshortly Node Runtime
//!
//! Wires the subsystems together and runs them until shutdown.
//!
//! ## Modular Structure
//!
//! - `container/` - Configuration and the wired subsystem instances
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (file, then environment)
//! 2. Initialize telemetry
//! 3. Open storage and rebuild the ledger from it
//! 4. Start the statistics refresher (periodic mode only)
//! 5. Start the HTTP server
//!
//! ## Shutdown
//!
//! Ctrl-C flips a `watch` channel; the refresher stops between ticks and the
//! server drains in-flight requests. Both tasks are awaited before exit.

pub mod container;

use std::future::Future;
use std::sync::Arc;

use ps_02_update_storage::StoreError;
use ps_03_statistics::{run_refresher, StatisticsMode};
use ps_05_api_gateway::{ApiGatewayService, GatewayError};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};

pub use container::{ConfigError, NodeConfig, SubsystemContainer};

/// Runtime errors.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("task failed: {0}")]
    Task(String),
}

/// The node runtime orchestrating all subsystems.
pub struct NodeRuntime {
    config: NodeConfig,
    container: SubsystemContainer,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl NodeRuntime {
    pub fn new(config: NodeConfig) -> Result<Self, RuntimeError> {
        info!("Creating postshortly node runtime");
        let container = SubsystemContainer::new(&config)?;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            config,
            container,
            shutdown_tx,
            shutdown_rx,
        })
    }

    pub fn container(&self) -> &SubsystemContainer {
        &self.container
    }

    /// Run until Ctrl-C.
    pub async fn run(self) -> Result<(), RuntimeError> {
        let addr = self.config.gateway.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{}: {}", addr, e)))?;

        self.run_until(listener, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {}", e);
            }
        })
        .await
    }

    /// Serve on `listener` until `signal` resolves or the server exits.
    pub async fn run_until<F>(self, listener: TcpListener, signal: F) -> Result<(), RuntimeError>
    where
        F: Future<Output = ()>,
    {
        let refresher = match self.container.statistics.mode() {
            StatisticsMode::Periodic { interval } => Some(tokio::spawn(run_refresher(
                Arc::clone(&self.container.statistics),
                interval,
                self.shutdown_rx.clone(),
            ))),
            StatisticsMode::Synchronous => None,
        };

        let gateway = ApiGatewayService::new(self.config.gateway.clone(), self.container.app_state())?;
        let mut server = tokio::spawn(gateway.serve_on(listener, self.shutdown_rx.clone()));

        info!("Node is running. Press Ctrl+C to stop.");

        let early_exit = tokio::select! {
            _ = signal => None,
            result = &mut server => Some(result),
        };

        info!("Initiating graceful shutdown...");
        if self.shutdown_tx.send(true).is_err() {
            error!("Failed to send shutdown signal: no receivers");
        }

        let server_result = match early_exit {
            Some(result) => result,
            None => server.await,
        };

        if let Some(handle) = refresher {
            handle
                .await
                .map_err(|e| RuntimeError::Task(e.to_string()))?;
        }

        server_result.map_err(|e| RuntimeError::Task(e.to_string()))??;
        info!("Shutdown complete");
        Ok(())
    }
}
