//! Metrics collection and exposition.
//!
//! # Metrics
//! - `catalog_requests_total` (counter): requests by method, route, status
//! - `catalog_request_duration_seconds` (histogram): latency by method, route
//! - `catalog_documents` (gauge): documents per collection
//! - `catalog_neighbor_rejections_total` (counter): rejected neighbor candidates by reason
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    metrics::counter!(
        "catalog_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "catalog_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_collection_size(collection: &'static str, len: usize) {
    metrics::gauge!("catalog_documents", "collection" => collection).set(len as f64);
}

pub fn record_neighbor_rejection(reason: &'static str) {
    metrics::counter!("catalog_neighbor_rejections_total", "reason" => reason).increment(1);
}
