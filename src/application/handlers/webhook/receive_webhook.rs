//! ReceiveWebhookHandler - validates and dispatches inbound webhook requests.
//!
//! Stages run strictly in order and the first failure ends processing:
//!
//! 1. Method and content type: `POST` with a JSON content type
//! 2. Token presence: the request-token header exists (it may be empty)
//! 3. Handshake: the remote platform confirms the token
//! 4. Payload schema: `eventName`, `mode` and `content`
//! 5. Dispatch to the handler bound to the event
//!
//! Failures answer with a bare status; details go to the `webhooks` log
//! target only.

use std::sync::Arc;

use serde_json::Value;

use super::handler_table::HandlerTable;
use super::WebhookResponse;
use crate::config::AppConfig;
use crate::domain::transport::RequestDescriptor;
use crate::domain::webhook::{Mode, WebhookError, WebhookPayload, WebhookStage};
use crate::ports::HttpTransport;

/// An inbound webhook request, reduced to what validation needs.
#[derive(Debug, Clone, Default)]
pub struct InboundWebhook {
    pub method: String,
    pub content_type: Option<String>,
    /// Value of the request-token header; `None` when the header is absent.
    pub token: Option<String>,
    pub body: Vec<u8>,
}

/// Receiver settings.
#[derive(Debug, Clone)]
pub struct ReceiverConfig {
    /// Remote API base URL the handshake is sent to.
    pub base_url: String,
    pub credentials_configured: bool,
    /// Name of the request-token header, for logging.
    pub token_header: String,
    pub require_live_mode: bool,
}

impl ReceiverConfig {
    pub fn from_app(config: &AppConfig) -> Self {
        Self {
            base_url: config.remote.base_url.clone(),
            credentials_configured: config.remote.has_secret_key(),
            token_header: config.webhook.token_header.clone(),
            require_live_mode: config.webhook.require_live_mode,
        }
    }
}

/// Validates inbound webhooks and runs their handlers.
#[derive(Clone)]
pub struct ReceiveWebhookHandler {
    transport: Arc<dyn HttpTransport>,
    handlers: HandlerTable,
    config: ReceiverConfig,
}

impl ReceiveWebhookHandler {
    pub fn new(transport: Arc<dyn HttpTransport>, handlers: HandlerTable, config: ReceiverConfig) -> Self {
        Self {
            transport,
            handlers,
            config,
        }
    }

    /// Process one request. Never fails; errors become their status code.
    pub async fn handle(&self, request: InboundWebhook) -> WebhookResponse {
        match self.process(request).await {
            Ok(response) => {
                tracing::debug!(target: "webhooks", stage = ?WebhookStage::ResponseEmitted, status = %response.status, "Webhook processed");
                response
            }
            Err(e) => {
                tracing::warn!(
                    target: "webhooks",
                    stage = ?e.stage(),
                    status = %e.status_code(),
                    error = %e,
                    "Webhook rejected"
                );
                WebhookResponse::status(e.status_code())
            }
        }
    }

    async fn process(&self, request: InboundWebhook) -> Result<WebhookResponse, WebhookError> {
        tracing::debug!(target: "webhooks", stage = ?WebhookStage::Entry, method = %request.method, "Webhook received");

        check_method_and_content_type(&request)?;

        let token = request
            .token
            .as_deref()
            .ok_or_else(|| WebhookError::MissingToken(self.config.token_header.clone()))?;

        self.handshake(token).await?;

        let payload = WebhookPayload::parse(&request.body)?;
        if self.config.require_live_mode && payload.mode == Mode::Test {
            return Err(WebhookError::TestModeRejected);
        }

        tracing::debug!(target: "webhooks", stage = ?WebhookStage::EventDispatch, event = %payload.event_name, "Dispatching webhook");
        self.handlers.dispatch(&payload).await
    }

    /// Ask the remote platform to confirm the request token.
    async fn handshake(&self, token: &str) -> Result<(), WebhookError> {
        if !self.config.credentials_configured {
            return Err(WebhookError::HandshakeFailed("No API key configured".to_string()));
        }

        let url = self.validation_url(token)?;
        let envelope = self.transport.execute(RequestDescriptor::get(url)).await;

        if let Some(error) = envelope.error() {
            return Err(WebhookError::HandshakeFailed(format!(
                "validation request failed ({}): {}",
                envelope.http_code(),
                error
            )));
        }
        if envelope.http_code() != 200 {
            return Err(WebhookError::HandshakeFailed(format!(
                "unexpected status {}",
                envelope.http_code()
            )));
        }

        let body: Value = envelope
            .content()
            .and_then(|body| serde_json::from_str(body).ok())
            .ok_or_else(|| WebhookError::HandshakeFailed("response is not JSON".to_string()))?;

        match body.get("token").and_then(Value::as_str) {
            Some(echoed) if echoed == token => Ok(()),
            _ => Err(WebhookError::HandshakeFailed("token mismatch".to_string())),
        }
    }

    fn validation_url(&self, token: &str) -> Result<String, WebhookError> {
        let mut url = reqwest::Url::parse(&self.config.base_url)
            .map_err(|e| WebhookError::HandshakeFailed(format!("invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| WebhookError::HandshakeFailed("invalid base URL".to_string()))?
            .pop_if_empty()
            .push("requestvalidation")
            .push(token);
        Ok(url.to_string())
    }
}

fn check_method_and_content_type(request: &InboundWebhook) -> Result<(), WebhookError> {
    if request.method != "POST" {
        return Err(WebhookError::MethodNotAllowed(request.method.clone()));
    }
    match request.content_type.as_deref() {
        Some(content_type) if content_type.contains("application/json") => Ok(()),
        other => Err(WebhookError::UnsupportedContentType(
            other.unwrap_or("none").to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::transport::MockTransport;
    use axum::http::StatusCode;
    use crate::config::TaxConfig;
    use crate::domain::transport::Envelope;
    use crate::domain::webhook::TaxRate;
    use serde_json::json;

    const BASE: &str = "https://api.test/api";
    const TOKEN: &str = "tok-123";

    fn config() -> ReceiverConfig {
        ReceiverConfig {
            base_url: BASE.to_string(),
            credentials_configured: true,
            token_header: "X-Snipcart-RequestToken".to_string(),
            require_live_mode: false,
        }
    }

    fn valid_remote() -> Arc<MockTransport> {
        Arc::new(MockTransport::new().with_json("/requestvalidation/", 200, json!({"token": TOKEN})))
    }

    fn receiver(transport: Arc<MockTransport>) -> ReceiveWebhookHandler {
        receiver_with(transport, config())
    }

    fn receiver_with(transport: Arc<MockTransport>, config: ReceiverConfig) -> ReceiveWebhookHandler {
        let taxes = TaxConfig {
            rates: vec![TaxRate {
                name: "VAT".to_string(),
                rate: 0.2,
                number_for_invoice: String::new(),
            }],
            ..Default::default()
        };
        ReceiveWebhookHandler::new(transport, HandlerTable::standard(taxes), config)
    }

    fn request(body: Value) -> InboundWebhook {
        InboundWebhook {
            method: "POST".to_string(),
            content_type: Some("application/json; charset=utf-8".to_string()),
            token: Some(TOKEN.to_string()),
            body: serde_json::to_vec(&body).unwrap(),
        }
    }

    fn order_completed() -> Value {
        json!({"eventName": "order.completed", "mode": "Test", "content": {}})
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Transport Shape Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn non_post_is_not_found_without_handshake() {
        let transport = valid_remote();
        let receiver = receiver(transport.clone());

        let response = receiver
            .handle(InboundWebhook {
                method: "GET".to_string(),
                ..request(order_completed())
            })
            .await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn non_json_content_type_is_not_found() {
        let transport = valid_remote();
        let receiver = receiver(transport.clone());

        let response = receiver
            .handle(InboundWebhook {
                content_type: Some("text/plain".to_string()),
                ..request(order_completed())
            })
            .await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_token_short_circuits_before_handshake() {
        let transport = valid_remote();
        let receiver = receiver(transport.clone());

        let response = receiver
            .handle(InboundWebhook {
                token: None,
                ..request(order_completed())
            })
            .await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(transport.calls_to("requestvalidation"), 0);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Handshake Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn handshake_calls_validation_endpoint() {
        let transport = valid_remote();
        let receiver = receiver(transport.clone());

        receiver.handle(request(order_completed())).await;

        assert_eq!(
            transport.requests()[0].url,
            "https://api.test/api/requestvalidation/tok-123"
        );
    }

    #[tokio::test]
    async fn echoed_token_mismatch_fails() {
        let transport = Arc::new(
            MockTransport::new().with_json("/requestvalidation/", 200, json!({"token": "other"})),
        );
        let receiver = receiver(transport);

        let response = receiver.handle(request(order_completed())).await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn handshake_error_status_fails() {
        let transport = Arc::new(
            MockTransport::new().with_json("/requestvalidation/", 401, json!({"token": TOKEN})),
        );
        let receiver = receiver(transport);

        assert_eq!(
            receiver.handle(request(order_completed())).await.status,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn handshake_non_json_fails() {
        let transport = Arc::new(
            MockTransport::new()
                .with_response("/requestvalidation/", Envelope::success("ok".to_string(), 200)),
        );
        let receiver = receiver(transport);

        assert_eq!(
            receiver.handle(request(order_completed())).await.status,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn empty_token_passes_presence_check() {
        let transport = Arc::new(
            MockTransport::new().with_json("/requestvalidation/", 200, json!({"token": ""})),
        );
        let receiver = receiver(transport.clone());

        let response = receiver
            .handle(InboundWebhook {
                token: Some(String::new()),
                ..request(order_completed())
            })
            .await;

        assert_eq!(transport.calls_to("requestvalidation"), 1);
        assert_eq!(response.status, StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn unconfigured_receiver_fails_handshake_without_request() {
        let transport = valid_remote();
        let receiver = receiver_with(
            transport.clone(),
            ReceiverConfig {
                credentials_configured: false,
                ..config()
            },
        );

        let response = receiver.handle(request(order_completed())).await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(transport.call_count(), 0);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Payload & Dispatch Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn order_completed_is_accepted_with_empty_body() {
        let receiver = receiver(valid_remote());

        let response = receiver.handle(request(order_completed())).await;

        assert_eq!(response.status, StatusCode::ACCEPTED);
        assert!(response.body.is_none());
    }

    #[tokio::test]
    async fn unknown_event_is_bad_request() {
        let receiver = receiver(valid_remote());

        let response = receiver
            .handle(request(json!({"eventName": "order.refunded", "mode": "Live", "content": {}})))
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_content_is_bad_request() {
        let receiver = receiver(valid_remote());

        let response = receiver
            .handle(request(json!({"eventName": "order.completed", "mode": "Live"})))
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_mode_rejected_when_live_required() {
        let receiver = receiver_with(
            valid_remote(),
            ReceiverConfig {
                require_live_mode: true,
                ..config()
            },
        );

        let response = receiver.handle(request(order_completed())).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn taxes_calculate_returns_json_body() {
        let receiver = receiver(valid_remote());

        let response = receiver
            .handle(request(json!({
                "eventName": "taxes.calculate",
                "mode": "Live",
                "content": {"items": [
                    {"taxable": true, "taxes": ["VAT"], "totalPriceWithoutTaxes": 10.0},
                    {"taxable": true, "taxes": ["VAT"], "totalPriceWithoutTaxes": 5.0}
                ]}
            })))
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body.unwrap()["taxes"][0]["amount"], json!(3.0));
    }

    #[tokio::test]
    async fn taxes_calculate_without_items_is_bad_request() {
        let receiver = receiver(valid_remote());

        let response = receiver
            .handle(request(json!({"eventName": "taxes.calculate", "mode": "Live", "content": {}})))
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }
}
