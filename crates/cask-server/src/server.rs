use std::sync::Arc;

use cask_store::CollectionRegistry;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::{build_router, SharedStore};

/// Cask HTTP server.
pub struct CaskServer {
    config: ServerConfig,
    store: SharedStore,
}

impl CaskServer {
    /// Create a server backed by a fresh in-memory registry.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let registry: CollectionRegistry<serde_json::Value> =
            CollectionRegistry::new(config.store.clone())?;
        Ok(Self {
            config,
            store: Arc::new(registry),
        })
    }

    /// Create a server over an existing store.
    pub fn with_store(config: ServerConfig, store: SharedStore) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(Arc::clone(&self.store))
    }

    /// Serve requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            bind_addr = %self.config.bind_addr,
            set_timeout_ms = self.config.store.set_timeout_ms,
            "Cask server listening"
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
