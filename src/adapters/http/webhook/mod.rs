//! HTTP adapter for the webhook receiver.
//!
//! - `ANY {webhook.path}` - Receive remote platform webhooks

mod handlers;
mod routes;

pub use handlers::{receive_webhook, WebhookAppState};
pub use routes::webhook_router;
