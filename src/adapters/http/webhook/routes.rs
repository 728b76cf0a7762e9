//! Route configuration for the webhook endpoint.

use axum::routing::any;
use axum::Router;

use super::handlers::{receive_webhook, WebhookAppState};
use crate::config::WebhookConfig;

/// Creates the webhook router.
///
/// Routes:
/// - `ANY {webhook.path}` - Webhook receiver; non-POST requests answer 404
pub fn webhook_router(config: &WebhookConfig) -> Router<WebhookAppState> {
    Router::new().route(&config.path, any(receive_webhook))
}
