//! Webhook receiver configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Webhook receiver configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Relative path the receiver is mounted at
    #[serde(default = "default_path")]
    pub path: String,

    /// Header carrying the request token
    #[serde(default = "default_token_header")]
    pub token_header: String,

    /// Reject `Test` mode payloads
    #[serde(default)]
    pub require_live_mode: bool,
}

impl WebhookConfig {
    /// Validate webhook configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.path.starts_with('/') {
            return Err(ValidationError::InvalidWebhookPath);
        }
        if axum::http::HeaderName::try_from(self.token_header.as_str()).is_err() {
            return Err(ValidationError::InvalidTokenHeader);
        }
        Ok(())
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            token_header: default_token_header(),
            require_live_mode: false,
        }
    }
}

fn default_path() -> String {
    "/webhooks/storefront".to_string()
}

fn default_token_header() -> String {
    "X-Snipcart-RequestToken".to_string()
}
