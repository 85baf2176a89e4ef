//! Startup orchestration.
//!
//! Order: metrics recorder → document store → HTTP router → TCP listener.
//! Any failure is returned to the caller; nothing here exits the process.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::CatalogConfig;
use crate::http::HttpServer;
use crate::observability::metrics;
use crate::store::{Store, StoreError};

/// Errors that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to open store: {0}")]
    Store(#[from] StoreError),
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
}

/// A fully initialized service, bound and ready to serve.
pub struct Application {
    server: HttpServer,
    listener: TcpListener,
}

impl Application {
    /// Initialize every subsystem from `config`.
    pub async fn build(config: CatalogConfig) -> Result<Self, StartupError> {
        if config.observability.metrics_enabled {
            let addr: SocketAddr = config
                .observability
                .metrics_address
                .parse()
                .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
            metrics::init_metrics(addr)?;
        }

        let store = Arc::new(Store::open(&config.store.url)?);
        tracing::info!(url = %config.store.url, "Store opened");

        let listener = TcpListener::bind(&config.listener.bind_address)
            .await
            .map_err(|source| StartupError::Bind {
                address: config.listener.bind_address.clone(),
                source,
            })?;

        let server = HttpServer::new(config, store);
        Ok(Self { server, listener })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until `shutdown` fires.
    pub async fn run(self, shutdown: broadcast::Receiver<()>) -> std::io::Result<()> {
        self.server.run(self.listener, shutdown).await
    }
}
