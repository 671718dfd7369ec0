use std::sync::Arc;

use actix_web::dev::ServerHandle;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::db::store::Store;

/// Handles graceful shutdown of the application
///
/// On SIGTERM or CTRL+C:
/// 1. Stop the HTTP server (in-flight requests finish)
/// 2. Wait for the server task to exit
/// 3. Release database connections
pub struct ShutdownCoordinator {
    server_handle: ServerHandle,
    server_task: JoinHandle<Result<(), std::io::Error>>,
    store: Arc<dyn Store>,
}

impl ShutdownCoordinator {
    pub fn new(
        server_handle: ServerHandle,
        server_task: JoinHandle<Result<(), std::io::Error>>,
        store: Arc<dyn Store>,
    ) -> Self {
        Self {
            server_handle,
            server_task,
            store,
        }
    }

    /// Wait for a shutdown signal, then shut down gracefully
    pub async fn wait_for_shutdown(self) -> Result<(), std::io::Error> {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        let mut terminate = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
        #[cfg(unix)]
        let terminate = terminate.recv();

        #[cfg(not(unix))]
        let terminate = std::future::pending::<Option<()>>();

        tokio::select! {
            result = ctrl_c => {
                result?;
                info!("Received CTRL+C signal, initiating graceful shutdown...");
            }
            _ = terminate => {
                info!("Received SIGTERM signal, initiating graceful shutdown...");
            }
        }

        self.shutdown().await
    }

    async fn shutdown(self) -> Result<(), std::io::Error> {
        info!("Stopping HTTP server (no longer accepting new requests)...");
        self.server_handle.stop(true).await;

        let result = match self.server_task.await {
            Ok(Ok(())) => {
                info!("HTTP server shut down successfully");
                Ok(())
            }
            Ok(Err(e)) => {
                error!("HTTP server encountered error during shutdown: {:?}", e);
                Err(e)
            }
            Err(e) => {
                error!("HTTP server task panicked: {:?}", e);
                Err(std::io::Error::other(e))
            }
        };

        info!("Closing {} store...", self.store.backend());
        self.store.close().await;
        info!("Graceful shutdown completed");

        result
    }
}
