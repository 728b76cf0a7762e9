//! Event handler table.
//!
//! Binds every supported event to exactly one handler. The standard table
//! answers `taxes.calculate` with computed taxes and acknowledges every
//! other event; individual bindings can be replaced.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;

use super::tax_calculation::TaxCalculationHandler;
use super::WebhookResponse;
use crate::config::TaxConfig;
use crate::domain::webhook::{EventName, WebhookError, WebhookPayload};

/// Handles one validated webhook event.
#[async_trait]
pub trait WebhookEventHandler: Send + Sync {
    async fn handle(&self, payload: &WebhookPayload) -> Result<WebhookResponse, WebhookError>;
}

/// Logs the event and answers 202 with no body.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcknowledgeHandler;

#[async_trait]
impl WebhookEventHandler for AcknowledgeHandler {
    async fn handle(&self, payload: &WebhookPayload) -> Result<WebhookResponse, WebhookError> {
        tracing::info!(
            target: "webhooks",
            event = %payload.event_name,
            mode = payload.mode.as_str(),
            "Webhook event acknowledged"
        );
        Ok(WebhookResponse::status(StatusCode::ACCEPTED))
    }
}

/// Fixed mapping from event to handler.
#[derive(Clone)]
pub struct HandlerTable {
    handlers: HashMap<EventName, Arc<dyn WebhookEventHandler>>,
}

impl HandlerTable {
    /// Tax calculation for `taxes.calculate`, acknowledgement for the rest.
    pub fn standard(taxes: TaxConfig) -> Self {
        let acknowledge: Arc<dyn WebhookEventHandler> = Arc::new(AcknowledgeHandler);
        let mut handlers: HashMap<EventName, Arc<dyn WebhookEventHandler>> = EventName::ALL
            .into_iter()
            .map(|event| (event, Arc::clone(&acknowledge)))
            .collect();
        handlers.insert(
            EventName::TaxesCalculate,
            Arc::new(TaxCalculationHandler::new(taxes)),
        );
        Self { handlers }
    }

    /// Replace the handler bound to `event`.
    pub fn with_handler(mut self, event: EventName, handler: Arc<dyn WebhookEventHandler>) -> Self {
        self.handlers.insert(event, handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the handler bound to the payload's event.
    pub async fn dispatch(&self, payload: &WebhookPayload) -> Result<WebhookResponse, WebhookError> {
        let handler = self
            .handlers
            .get(&payload.event_name)
            .ok_or_else(|| WebhookError::UnknownEvent(payload.event_name.to_string()))?;
        handler.handle(payload).await
    }
}
