//! Tower/axum middleware owned by the service.

pub mod metrics;

pub use metrics::track_requests;
