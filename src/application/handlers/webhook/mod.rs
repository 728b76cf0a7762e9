//! Webhook handlers.

mod handler_table;
mod receive_webhook;
mod tax_calculation;

pub use handler_table::{AcknowledgeHandler, HandlerTable, WebhookEventHandler};
pub use receive_webhook::{InboundWebhook, ReceiveWebhookHandler, ReceiverConfig};
pub use tax_calculation::TaxCalculationHandler;

use axum::http::StatusCode;
use serde_json::Value;

/// What the receiver answers: a status and, for some events, a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookResponse {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl WebhookResponse {
    pub fn status(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    pub fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }
}
