//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → CatalogConfig (validated, immutable)
//!     → handed to the store, HTTP server and observability at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Environment (`PORT`, `STORE_URL`, `LOG_LEVEL`) wins over the file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::{
    CatalogConfig, LimitsConfig, ListenerConfig, LogFormat, ObservabilityConfig,
    PaginationConfig, StoreConfig, TimeoutConfig,
};
