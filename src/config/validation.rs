//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (page sizes, timeouts, body limits)
//! - Check that addresses and the store connection string are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CatalogConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::CatalogConfig;
use crate::store::StoreUrl;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &CatalogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if let Err(e) = StoreUrl::parse(&config.store.url) {
        errors.push(ValidationError::new("store.url", e.to_string()));
    }

    let pagination = &config.pagination;
    if pagination.default_page_size == 0 {
        errors.push(ValidationError::new(
            "pagination.default_page_size",
            "must be greater than 0",
        ));
    }
    if pagination.max_page_size == 0 {
        errors.push(ValidationError::new(
            "pagination.max_page_size",
            "must be greater than 0",
        ));
    }
    if pagination.default_page_size > pagination.max_page_size {
        errors.push(ValidationError::new(
            "pagination.default_page_size",
            "must not exceed max_page_size",
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::new("limits.max_body_size", "must be greater than 0"));
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&CatalogConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = CatalogConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.store.url = "mongodb://localhost/catalog".into();
        config.pagination.default_page_size = 500;
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "listener.bind_address",
                "store.url",
                "pagination.default_page_size",
                "timeouts.request_secs",
            ]
        );
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = CatalogConfig::default();
        config.observability.metrics_address = "bogus".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
