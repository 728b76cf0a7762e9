//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid remote base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid proxy URL: {0}")]
    InvalidProxy(String),

    #[error("Webhook path must start with '/'")]
    InvalidWebhookPath,

    #[error("Webhook token header is not a valid header name")]
    InvalidTokenHeader,

    #[error("Invalid tax rate for {0}: must be between 0 and 1")]
    InvalidTaxRate(String),

    #[error("Duplicate tax name: {0}")]
    DuplicateTaxName(String),

    #[error("Shipping tax {0} is not a configured tax")]
    UnknownShippingTax(String),
}
