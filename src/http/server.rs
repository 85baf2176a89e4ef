//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, body limit, request ID, metrics)
//! - Bind server to listener and stop on the shutdown broadcast

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::catalog::CountryCatalog;
use crate::config::{CatalogConfig, PaginationConfig};
use crate::http::handlers;
use crate::http::middleware::track_requests;
use crate::http::request::make_request_span;
use crate::store::Store;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CountryCatalog,
    pub pagination: PaginationConfig,
}

/// HTTP server for the country catalog.
pub struct HttpServer {
    router: Router,
    config: CatalogConfig,
}

impl HttpServer {
    /// Create a new HTTP server over `store`.
    pub fn new(config: CatalogConfig, store: Arc<Store>) -> Self {
        let state = AppState {
            catalog: CountryCatalog::new(store),
            pagination: config.pagination.clone(),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Literal segments take precedence over `{id}`, so `/country/sorted`
    /// never reaches the detail handler.
    #[allow(deprecated)]
    fn build_router(config: &CatalogConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route(
                "/country",
                get(handlers::list_countries).post(handlers::add_countries),
            )
            .route("/country/sorted", get(handlers::list_countries_sorted))
            .route("/country/{id}", get(handlers::get_country))
            .route("/country/{id}/neighbour", get(handlers::get_country_neighbors))
            .route(
                "/country/{id}/neighbors",
                get(handlers::get_country_neighbors).post(handlers::add_neighbors),
            )
            .route_layer(middleware::from_fn(track_requests))
            .fallback(handlers::route_not_found)
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_size))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// Run the server until `shutdown` receives a signal.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            store = %self.config.store.url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
