//! Integration tests for the webhook endpoint.
//!
//! The full axum router runs in-process; the handshake goes through the real
//! reqwest transport to a local mock of the remote platform.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use httpmock::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

use storefront_gateway::adapters::http::{webhook_router, WebhookAppState};
use storefront_gateway::adapters::{ReqwestTransport, TransportConfig};
use storefront_gateway::application::handlers::webhook::{
    HandlerTable, ReceiveWebhookHandler, ReceiverConfig,
};
use storefront_gateway::config::{TaxConfig, WebhookConfig};
use storefront_gateway::domain::webhook::TaxRate;

const TOKEN: &str = "9f1c7d4e";

// =============================================================================
// Test Infrastructure
// =============================================================================

fn taxes() -> TaxConfig {
    TaxConfig {
        rates: vec![TaxRate {
            name: "VAT".to_string(),
            rate: 0.20,
            number_for_invoice: "VAT-01".to_string(),
        }],
        ..Default::default()
    }
}

fn app(server: &MockServer) -> Router {
    let webhook = WebhookConfig::default();
    let transport =
        Arc::new(ReqwestTransport::new(TransportConfig::new().with_secret_key("secret")).unwrap());
    let receiver = ReceiveWebhookHandler::new(
        transport,
        HandlerTable::standard(taxes()),
        ReceiverConfig {
            base_url: server.url("/api"),
            credentials_configured: true,
            token_header: webhook.token_header.clone(),
            require_live_mode: false,
        },
    );
    webhook_router(&webhook).with_state(WebhookAppState::new(receiver, webhook.token_header.clone()))
}

fn webhook(body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/webhooks/storefront")
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("X-Snipcart-RequestToken", token);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_of(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

// =============================================================================
// End-to-end
// =============================================================================

#[tokio::test]
async fn order_completed_is_acknowledged() {
    let server = MockServer::start();
    let handshake = server.mock(|when, then| {
        when.method(GET)
            .path(format!("/api/requestvalidation/{}", TOKEN))
            .header_exists("authorization");
        then.status(200)
            .header("content-type", "application/json")
            .body(json!({"token": TOKEN}).to_string());
    });

    let response = app(&server)
        .oneshot(webhook(
            json!({"eventName": "order.completed", "mode": "Test", "content": {}}),
            Some(TOKEN),
        ))
        .await
        .unwrap();

    handshake.assert_hits(1);
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert!(body_of(response).await.is_empty());
}

#[tokio::test]
async fn missing_token_makes_no_handshake_call() {
    let server = MockServer::start();
    let handshake = server.mock(|when, then| {
        when.method(GET).path_includes("/api/requestvalidation/");
        then.status(200).body(json!({"token": TOKEN}).to_string());
    });

    let response = app(&server)
        .oneshot(webhook(
            json!({"eventName": "order.completed", "mode": "Test", "content": {}}),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    handshake.assert_hits(0);
}

#[tokio::test]
async fn mismatched_echoed_token_is_rejected() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path_includes("/api/requestvalidation/");
        then.status(200)
            .header("content-type", "application/json")
            .body(json!({"token": "someone-else"}).to_string());
    });

    let response = app(&server)
        .oneshot(webhook(
            json!({"eventName": "order.completed", "mode": "Live", "content": {}}),
            Some(TOKEN),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_of(response).await.is_empty());
}

#[tokio::test]
async fn unknown_event_is_bad_request() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path_includes("/api/requestvalidation/");
        then.status(200).body(json!({"token": TOKEN}).to_string());
    });

    let response = app(&server)
        .oneshot(webhook(
            json!({"eventName": "order.deleted", "mode": "Live", "content": {}}),
            Some(TOKEN),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn taxes_calculate_returns_computed_taxes() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path_includes("/api/requestvalidation/");
        then.status(200).body(json!({"token": TOKEN}).to_string());
    });

    let response = app(&server)
        .oneshot(webhook(
            json!({
                "eventName": "taxes.calculate",
                "mode": "Live",
                "content": {"items": [
                    {"taxable": true, "taxes": ["VAT"], "totalPriceWithoutTaxes": 10.00},
                    {"taxable": true, "taxes": ["VAT"], "totalPriceWithoutTaxes": 5.00},
                    {"taxable": false, "taxes": ["VAT"], "totalPriceWithoutTaxes": 50.00}
                ]}
            }),
            Some(TOKEN),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&body_of(response).await).unwrap();
    assert_eq!(
        body,
        json!({"taxes": [{
            "name": "VAT",
            "amount": 3.0,
            "rate": 0.2,
            "numberForInvoice": "VAT-01",
            "includedInPrice": false
        }]})
    );
}

#[tokio::test]
async fn unreachable_platform_fails_handshake() {
    let webhook_config = WebhookConfig::default();
    let transport =
        Arc::new(ReqwestTransport::new(TransportConfig::new().with_secret_key("secret")).unwrap());
    let receiver = ReceiveWebhookHandler::new(
        transport,
        HandlerTable::standard(taxes()),
        ReceiverConfig {
            // Nothing listens on port 9
            base_url: "http://127.0.0.1:9/api".to_string(),
            credentials_configured: true,
            token_header: webhook_config.token_header.clone(),
            require_live_mode: false,
        },
    );
    let app = webhook_router(&webhook_config)
        .with_state(WebhookAppState::new(receiver, webhook_config.token_header.clone()));

    let response = app
        .oneshot(webhook(
            json!({"eventName": "order.completed", "mode": "Live", "content": {}}),
            Some(TOKEN),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
