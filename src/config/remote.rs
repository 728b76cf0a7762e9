//! Remote platform configuration

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Which remote environment the secret key belongs to.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RemoteEnvironment {
    Live,
    #[default]
    Test,
}

/// Remote REST API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    /// Secret API key; without it every gateway call fails fast
    #[serde(default)]
    pub secret_key: Option<SecretString>,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub environment: RemoteEnvironment,

    /// Default user agent for outbound requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Total request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Optional outbound proxy URL
    pub proxy: Option<String>,

    /// Run batches concurrently; `false` selects the sequential fallback
    #[serde(default = "default_concurrent_batches")]
    pub concurrent_batches: bool,
}

impl RemoteConfig {
    pub fn has_secret_key(&self) -> bool {
        self.secret_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Validate remote configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        reqwest::Url::parse(&self.base_url)
            .map_err(|_| ValidationError::InvalidBaseUrl(self.base_url.clone()))?;

        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > self.timeout_secs {
            return Err(ValidationError::InvalidTimeout);
        }

        if let Some(proxy) = &self.proxy {
            reqwest::Url::parse(proxy).map_err(|_| ValidationError::InvalidProxy(proxy.clone()))?;
        }

        if self.environment == RemoteEnvironment::Live && !self.has_secret_key() {
            return Err(ValidationError::MissingRequired("REMOTE__SECRET_KEY"));
        }

        Ok(())
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            secret_key: None,
            base_url: default_base_url(),
            environment: RemoteEnvironment::default(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            proxy: None,
            concurrent_batches: default_concurrent_batches(),
        }
    }
}

fn default_base_url() -> String {
    "https://app.snipcart.com/api".to_string()
}

fn default_user_agent() -> String {
    concat!("storefront-gateway/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_concurrent_batches() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_defaults() {
        let config = RemoteConfig::default();
        assert_eq!(config.base_url, "https://app.snipcart.com/api");
        assert_eq!(config.environment, RemoteEnvironment::Test);
        assert!(config.concurrent_batches);
        assert!(!config.has_secret_key());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_secret_is_not_a_key() {
        let config = RemoteConfig {
            secret_key: Some(SecretString::new(String::new())),
            ..Default::default()
        };
        assert!(!config.has_secret_key());
    }

    #[test]
    fn test_live_requires_secret_key() {
        let config = RemoteConfig {
            environment: RemoteEnvironment::Live,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("REMOTE__SECRET_KEY"))
        );

        let config = RemoteConfig {
            environment: RemoteEnvironment::Live,
            secret_key: Some(SecretString::new("live-key".to_string())),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        let config = RemoteConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_connect_timeout_cannot_exceed_total() {
        let config = RemoteConfig {
            timeout_secs: 5,
            connect_timeout_secs: 10,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }
}
