//! Country catalog service library.
//!
//! A CRUD HTTP service over a catalog of countries and a directed "neighbor"
//! relation between them, backed by a document store.
//!
//! ```text
//!   Client ──▶ http (router, middleware, handlers) ──▶ catalog ──▶ store ──▶ snapshot file
//!                              │                                    │
//!                              └──── observability (tracing, metrics) ┘
//! ```

// Core subsystems
pub mod catalog;
pub mod config;
pub mod http;
pub mod models;
pub mod store;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use catalog::{CatalogError, CountryCatalog};
pub use config::CatalogConfig;
pub use http::HttpServer;
pub use lifecycle::{Application, Shutdown};
pub use store::{Store, StoreError};
