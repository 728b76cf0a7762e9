//! Mock transport for testing.
//!
//! Responses are scripted by URL fragment; every executed request is
//! recorded so tests can assert on what reached the network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::transport::{Envelope, RequestDescriptor};
use crate::ports::HttpTransport;

/// Scripted `HttpTransport`.
///
/// The longest matching URL fragment wins. Unmatched requests answer 404.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<Vec<(String, Envelope<String>)>>,
    requests: Mutex<Vec<RequestDescriptor>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests whose URL contains `fragment`.
    pub fn with_response(self, fragment: impl Into<String>, envelope: Envelope<String>) -> Self {
        self.set_response(fragment, envelope);
        self
    }

    /// Answer with a JSON body and status.
    pub fn with_json(self, fragment: impl Into<String>, status: u16, body: serde_json::Value) -> Self {
        let envelope = if (200..300).contains(&status) {
            Envelope::success(body.to_string(), status)
        } else {
            Envelope::new(Some(body.to_string()), status, Some(format!("HTTP {}", status)))
        };
        self.with_response(fragment, envelope)
    }

    /// Sleep before answering each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Replace or add a scripted response after construction.
    pub fn set_response(&self, fragment: impl Into<String>, envelope: Envelope<String>) {
        let fragment = fragment.into();
        let mut routes = self.routes.lock().unwrap();
        routes.retain(|(existing, _)| *existing != fragment);
        routes.push((fragment, envelope));
    }

    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Number of executed requests whose URL contains `fragment`.
    pub fn calls_to(&self, fragment: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url.contains(fragment))
            .count()
    }

    /// Highest number of requests observed executing at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn lookup(&self, url: &str) -> Envelope<String> {
        self.routes
            .lock()
            .unwrap()
            .iter()
            .filter(|(fragment, _)| url.contains(fragment.as_str()))
            .max_by_key(|(fragment, _)| fragment.len())
            .map(|(_, envelope)| envelope.clone())
            .unwrap_or_else(|| Envelope::failure(404, "HTTP 404 Not Found"))
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: RequestDescriptor) -> Envelope<String> {
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.lookup(&url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn longest_fragment_wins() {
        let transport = MockTransport::new()
            .with_json("/orders", 200, json!({"items": []}))
            .with_json("/orders/abc", 200, json!({"token": "abc"}));

        let envelope = transport
            .execute(RequestDescriptor::get("https://api.test/orders/abc"))
            .await;

        assert_eq!(envelope.content().map(String::as_str), Some(r#"{"token":"abc"}"#));
    }

    #[tokio::test]
    async fn unmatched_request_answers_not_found() {
        let transport = MockTransport::new();

        let envelope = transport.execute(RequestDescriptor::get("https://api.test/x")).await;

        assert_eq!(envelope.http_code(), 404);
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn error_status_produces_error_envelope() {
        let transport = MockTransport::new().with_json("/orders", 500, json!({"message": "boom"}));

        let envelope = transport.execute(RequestDescriptor::get("https://api.test/orders")).await;

        assert!(!envelope.is_success());
        assert_eq!(envelope.http_code(), 500);
    }
}
