//! Integration tests for the REST gateway and its response cache.
//!
//! These run the real reqwest transport against a local mock server and
//! verify:
//! 1. Identical reads reach the network once and return identical envelopes
//! 2. Different paging options use distinct cache segments
//! 3. Forced refresh drops one segment only
//! 4. Batches return one envelope per request and reject an empty queue

use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use storefront_gateway::adapters::{InMemoryCacheStore, ReqwestTransport, TransportConfig};
use storefront_gateway::application::{
    BatchError, BatchMode, GatewayConfig, ReadOptions, RequestBatch, ResponseCache, RestGateway,
};
use storefront_gateway::domain::transport::{RequestDescriptor, NOT_CONFIGURED_ERROR};
use storefront_gateway::ports::HttpTransport;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn transport() -> Arc<dyn HttpTransport> {
    Arc::new(ReqwestTransport::new(TransportConfig::new().with_secret_key("secret")).unwrap())
}

fn gateway(server: &MockServer) -> RestGateway {
    let cache = ResponseCache::new(Arc::new(InMemoryCacheStore::new()));
    RestGateway::new(transport(), cache, GatewayConfig::new(server.url("/api")))
}

fn page(offset: &str) -> ReadOptions {
    ReadOptions::new()
        .with_filter("offset", offset)
        .with_filter("limit", "20")
        .with_ttl(Duration::from_secs(300))
}

// =============================================================================
// Cache Behaviour
// =============================================================================

#[tokio::test]
async fn identical_product_queries_hit_network_once() {
    let server = MockServer::start();
    let first_page = server.mock(|when, then| {
        when.method(GET)
            .path("/api/products")
            .query_param("offset", "0")
            .query_param("limit", "20")
            .header_exists("authorization");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"totalItems":42,"items":[{"id":"p1"}]}"#);
    });
    let gateway = gateway(&server);

    let first = gateway.products(page("0")).await;
    let second = gateway.products(page("0")).await;

    first_page.assert_hits(1);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first.envelope).unwrap(),
        serde_json::to_string(&second.envelope).unwrap()
    );
    assert_eq!(first.key, "products");
    assert_eq!(first.envelope.content().unwrap()["totalItems"], json!(42));
}

#[tokio::test]
async fn next_page_uses_a_distinct_segment() {
    let server = MockServer::start();
    let first_page = server.mock(|when, then| {
        when.method(GET).path("/api/products").query_param("offset", "0");
        then.status(200).body(r#"{"items":[{"id":"p1"}]}"#);
    });
    let second_page = server.mock(|when, then| {
        when.method(GET).path("/api/products").query_param("offset", "20");
        then.status(200).body(r#"{"items":[{"id":"p21"}]}"#);
    });
    let gateway = gateway(&server);

    let a = gateway.products(page("0")).await;
    let b = gateway.products(page("20")).await;
    gateway.products(page("0")).await;
    gateway.products(page("20")).await;

    first_page.assert_hits(1);
    second_page.assert_hits(1);
    assert_ne!(a.envelope, b.envelope);
}

#[tokio::test]
async fn force_refresh_refetches_only_its_segment() {
    let server = MockServer::start();
    let first_page = server.mock(|when, then| {
        when.method(GET).path("/api/orders").query_param("offset", "0");
        then.status(200).body(r#"{"items":[]}"#);
    });
    let second_page = server.mock(|when, then| {
        when.method(GET).path("/api/orders").query_param("offset", "20");
        then.status(200).body(r#"{"items":[]}"#);
    });
    let gateway = gateway(&server);

    gateway.orders(page("0")).await;
    gateway.orders(page("20")).await;
    gateway.orders(page("0").force_refresh()).await;
    gateway.orders(page("20")).await;

    first_page.assert_hits(2);
    second_page.assert_hits(1);
}

#[tokio::test]
async fn remote_errors_are_envelopes_and_not_cached() {
    let server = MockServer::start();
    let failing = server.mock(|when, then| {
        when.method(GET).path("/api/customers");
        then.status(500).body(r#"{"message":"unavailable"}"#);
    });
    let gateway = gateway(&server);

    let result = gateway.customers(ReadOptions::new()).await;
    gateway.customers(ReadOptions::new()).await;

    failing.assert_hits(2);
    assert_eq!(result.envelope.http_code(), 500);
    assert!(result.envelope.error().is_some());
}

#[tokio::test]
async fn unconfigured_gateway_never_reaches_network() {
    let server = MockServer::start();
    let any_request = server.mock(|when, then| {
        when.any_request();
        then.status(200).body("{}");
    });
    let cache = ResponseCache::new(Arc::new(InMemoryCacheStore::new()));
    let gateway = RestGateway::new(
        transport(),
        cache,
        GatewayConfig::new(server.url("/api")).with_credentials(false),
    );

    let result = gateway.products(ReadOptions::new()).await;

    any_request.assert_hits(0);
    assert_eq!(result.envelope.http_code(), 0);
    assert_eq!(result.envelope.error(), Some(NOT_CONFIGURED_ERROR));
}

// =============================================================================
// Batches
// =============================================================================

#[tokio::test]
async fn batch_returns_one_envelope_per_descriptor() {
    let server = MockServer::start();
    for path in ["/api/data/performance", "/api/data/orders/sales", "/api/data/orders/count"] {
        server.mock(|when, then| {
            when.method(GET).path(path);
            then.status(200).body("{}");
        });
    }
    let mut batch = RequestBatch::new(transport(), BatchMode::Concurrent);
    for path in ["/api/data/performance", "/api/data/orders/sales", "/api/data/orders/count"] {
        batch.enqueue(RequestDescriptor::get(server.url(path)));
    }

    let results = batch.execute().await.unwrap();

    assert_eq!(results.len(), 3);
    assert!(results.values().all(|e| e.is_success()));
    assert_eq!(batch.execute().await, Err(BatchError::EmptyBatch));
}

#[tokio::test]
async fn slow_request_times_out_without_affecting_siblings() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/slow");
        then.status(200).delay(Duration::from_millis(500)).body("{}");
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/fast");
        then.status(200).body("{}");
    });
    let mut batch = RequestBatch::new(transport(), BatchMode::Concurrent);
    batch
        .enqueue(RequestDescriptor::get(server.url("/api/slow")).with_timeout(Duration::from_millis(50)))
        .enqueue(RequestDescriptor::get(server.url("/api/fast")));

    let results = batch.execute().await.unwrap();

    assert_eq!(results[&server.url("/api/slow")].http_code(), 0);
    assert!(results[&server.url("/api/fast")].is_success());
}
