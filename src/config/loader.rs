//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::CatalogConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from a TOML file, apply environment overrides, and validate.
pub fn load_config(path: &Path) -> Result<CatalogConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: CatalogConfig = toml::from_str(&content)?;
    finalize(config, |key| std::env::var(key).ok())
}

/// Build configuration from defaults plus environment overrides.
pub fn load_from_env() -> Result<CatalogConfig, ConfigError> {
    finalize(CatalogConfig::default(), |key| std::env::var(key).ok())
}

fn finalize<F>(mut config: CatalogConfig, env: F) -> Result<CatalogConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    apply_env_overrides(&mut config, env);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply `PORT`, `STORE_URL` (or `MONGO_URL`) and `LOG_LEVEL` on top of `config`.
pub fn apply_env_overrides<F>(config: &mut CatalogConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = env("PORT").filter(|p| !p.trim().is_empty()) {
        let host = config
            .listener
            .bind_address
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        config.listener.bind_address = format!("{}:{}", host, port.trim());
    }

    if let Some(url) = env("STORE_URL").or_else(|| env("MONGO_URL")) {
        if !url.trim().is_empty() {
            config.store.url = url.trim().to_string();
        }
    }

    if let Some(level) = env("LOG_LEVEL").filter(|l| !l.trim().is_empty()) {
        config.observability.log_level = level.trim().to_string();
    }
}
