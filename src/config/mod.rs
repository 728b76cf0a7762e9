//! Application configuration module
//!
//! Configuration is read from an optional `storefront-gateway.toml` in the
//! working directory, then from environment variables with the
//! `STOREFRONT_GATEWAY` prefix. Nested values use double underscores.
//!
//! # Example
//!
//! ```no_run
//! use storefront_gateway::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod cache;
mod error;
mod remote;
mod server;
mod taxes;
mod webhook;

pub use cache::CacheConfig;
pub use error::{ConfigError, ValidationError};
pub use remote::{RemoteConfig, RemoteEnvironment};
pub use server::{Environment, ServerConfig};
pub use taxes::TaxConfig;
pub use webhook::WebhookConfig;

use serde::Deserialize;

/// Optional configuration file, resolved without extension.
pub const CONFIG_FILE: &str = "storefront-gateway";

/// Root application configuration
///
/// Every section has defaults, so an empty environment loads successfully;
/// the gateway then answers every call with a "not configured" envelope
/// until a secret key is provided.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote REST API (credentials, endpoint, timeouts)
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Response cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Inbound webhook endpoint
    #[serde(default)]
    pub webhook: WebhookConfig,

    /// Tax table for `taxes.calculate`
    #[serde(default)]
    pub taxes: TaxConfig,
}

impl AppConfig {
    /// Load configuration from the optional file and the environment
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads `storefront-gateway.toml` if present
    /// 3. Reads environment variables with `STOREFRONT_GATEWAY` prefix
    /// 4. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `STOREFRONT_GATEWAY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `STOREFRONT_GATEWAY__REMOTE__SECRET_KEY=...` -> `remote.secret_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::default()
                    .prefix("STOREFRONT_GATEWAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.remote.validate()?;
        self.webhook.validate()?;
        self.taxes.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
