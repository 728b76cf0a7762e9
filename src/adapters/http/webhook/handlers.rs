//! HTTP handler for the webhook endpoint.
//!
//! Translates the raw axum request into an [`InboundWebhook`] and the
//! receiver's answer back into a response. All validation lives in the
//! application layer.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::application::handlers::webhook::{InboundWebhook, ReceiveWebhookHandler};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the webhook endpoint.
#[derive(Clone)]
pub struct WebhookAppState {
    pub receiver: Arc<ReceiveWebhookHandler>,
    /// Header carrying the request token.
    pub token_header: String,
}

impl WebhookAppState {
    pub fn new(receiver: ReceiveWebhookHandler, token_header: impl Into<String>) -> Self {
        Self {
            receiver: Arc::new(receiver),
            token_header: token_header.into(),
        }
    }

    fn inbound(&self, method: &Method, headers: &HeaderMap, body: Bytes) -> InboundWebhook {
        InboundWebhook {
            method: method.as_str().to_string(),
            content_type: headers
                .get(CONTENT_TYPE)
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned()),
            token: headers
                .get(self.token_header.as_str())
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned()),
            body: body.to_vec(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// ANY {webhook.path} - Receive a webhook from the remote platform
///
/// Only `POST application/json` gets past the first stage; anything else
/// answers 404.
pub async fn receive_webhook(
    State(state): State<WebhookAppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = state.inbound(&method, &headers, body);
    let response = state.receiver.handle(request).await;

    match response.body {
        Some(body) => (response.status, Json(body)).into_response(),
        None => response.status.into_response(),
    }
}
