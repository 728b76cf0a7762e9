//! REST gateway.
//!
//! One accessor per remote resource. Reads go through the response cache
//! and return a keyed [`ResourceResult`]; writes are single uncached
//! requests checked against an exact expected status.
//!
//! Accessors never fail with `Err` for transport problems; the envelope
//! carries the outcome. Without a configured secret key every accessor
//! answers with [`Envelope::not_configured`] and no request is made.

mod carts;
mod customers;
mod dashboard;
mod discounts;
mod orders;
mod products;
mod settings;
mod subscriptions;

pub use dashboard::DashboardPeriod;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::application::batch::BatchMode;
use crate::application::cache::ResponseCache;
use crate::config::AppConfig;
use crate::domain::gateway::{FilterOptions, OptionRule, QueryOptions, Resource, SegmentKey};
use crate::domain::transport::{Envelope, HttpMethod, RequestDescriptor};
use crate::ports::HttpTransport;

/// Settings the gateway is constructed with.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub credentials_configured: bool,
    pub default_ttl: Duration,
    pub batch_mode: BatchMode,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials_configured: true,
            default_ttl: Duration::from_secs(300),
            batch_mode: BatchMode::Concurrent,
        }
    }

    pub fn from_app(config: &AppConfig) -> Self {
        Self {
            base_url: config.remote.base_url.clone(),
            credentials_configured: config.remote.has_secret_key(),
            default_ttl: config.cache.default_ttl(),
            batch_mode: BatchMode::from_concurrent_flag(config.remote.concurrent_batches),
        }
    }

    pub fn with_credentials(mut self, configured: bool) -> Self {
        self.credentials_configured = configured;
        self
    }

    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn with_batch_mode(mut self, mode: BatchMode) -> Self {
        self.batch_mode = mode;
        self
    }
}

/// Options for a read accessor.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Result key; defaults to the resource path.
    pub key: Option<String>,
    /// Raw filters; keys the resource does not accept are dropped.
    pub filters: FilterOptions,
    /// Cache TTL; defaults to the gateway's.
    pub ttl: Option<Duration>,
    /// Drop the matching segment before reading.
    pub force_refresh: bool,
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(name.into(), value.into());
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn force_refresh(mut self) -> Self {
        self.force_refresh = true;
        self
    }
}

/// A read result keyed by resource path or caller key.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceResult {
    pub key: String,
    pub envelope: Envelope<Value>,
}

/// A write whose response status did not match the expected one.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteFailure {
    pub expected: u16,
    pub envelope: Envelope<Value>,
}

impl fmt::Display for WriteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.envelope.error() {
            Some(error) => f.write_str(error),
            None => write!(
                f,
                "Expected HTTP {}, got {}",
                self.expected,
                self.envelope.http_code()
            ),
        }
    }
}

impl std::error::Error for WriteFailure {}

pub type WriteResult = Result<Envelope<Value>, WriteFailure>;

/// Gateway to the remote REST API.
#[derive(Clone)]
pub struct RestGateway {
    transport: Arc<dyn HttpTransport>,
    cache: ResponseCache,
    config: GatewayConfig,
}

impl RestGateway {
    pub fn new(transport: Arc<dyn HttpTransport>, cache: ResponseCache, config: GatewayConfig) -> Self {
        Self {
            transport,
            cache,
            config,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Check credentials and reachability with an uncached request.
    pub async fn test_connection(&self) -> Envelope<Value> {
        if !self.config.credentials_configured {
            return Envelope::not_configured();
        }
        let path = Resource::DomainSettings.path();
        let envelope = match self.url(path, &QueryOptions::default()) {
            Ok(url) => self.fetch_json(RequestDescriptor::get(url)).await,
            Err(envelope) => envelope,
        };

        if envelope.http_code() == 200 {
            tracing::info!(target: "rest_gateway", "Connection to remote API verified");
        } else {
            tracing::warn!(
                target: "rest_gateway",
                status = envelope.http_code(),
                error = envelope.error().unwrap_or_default(),
                "Connection test failed"
            );
        }
        envelope
    }

    /// Drop every cached segment of one resource.
    pub async fn reset_cache(&self, resource: Resource) {
        self.cache.invalidate_namespace(resource.cache_namespace()).await;
    }

    /// Drop the whole response cache.
    pub async fn reset_all_caches(&self) {
        self.cache.reset_all().await;
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Shared read/write plumbing
    // ════════════════════════════════════════════════════════════════════════════

    async fn read_list(&self, resource: Resource, options: ReadOptions) -> ResourceResult {
        self.read(
            resource.cache_namespace(),
            resource.path().to_string(),
            resource.list_rules(),
            options,
        )
        .await
    }

    async fn read_entity(&self, resource: Resource, id: &str, options: ReadOptions) -> ResourceResult {
        self.read(resource.cache_namespace(), resource.entity_path(id), &[], options)
            .await
    }

    async fn read(
        &self,
        namespace: &str,
        path: String,
        rules: &[OptionRule],
        options: ReadOptions,
    ) -> ResourceResult {
        let key = options.key.unwrap_or_else(|| path.clone());

        if !self.config.credentials_configured {
            tracing::warn!(target: "rest_gateway", path = %path, "Read skipped, no API key configured");
            return ResourceResult {
                key,
                envelope: Envelope::not_configured(),
            };
        }

        let query = QueryOptions::resolve(&options.filters, rules);
        let segment = SegmentKey::derive(namespace, &path, &query);
        if options.force_refresh {
            self.cache.invalidate(&segment).await;
        }

        let envelope = match self.url(&path, &query) {
            Ok(url) => {
                let ttl = options.ttl.unwrap_or(self.config.default_ttl);
                self.cache
                    .get_or_compute(&segment, ttl, || self.fetch_json(RequestDescriptor::get(url)))
                    .await
            }
            Err(envelope) => envelope,
        };

        ResourceResult { key, envelope }
    }

    async fn write(
        &self,
        resource: Resource,
        method: HttpMethod,
        path: String,
        body: Option<Value>,
        expected: u16,
    ) -> WriteResult {
        if !self.config.credentials_configured {
            tracing::warn!(target: "rest_gateway", path = %path, "Write skipped, no API key configured");
            return Err(WriteFailure {
                expected,
                envelope: Envelope::not_configured(),
            });
        }

        let url = self
            .url(&path, &QueryOptions::default())
            .map_err(|envelope| WriteFailure { expected, envelope })?;
        let mut request = RequestDescriptor::new(method, url);
        if let Some(body) = body {
            request = request.with_json_body(body);
        }

        let envelope = self.fetch_json(request).await;
        if envelope.http_code() != expected {
            tracing::warn!(
                target: "rest_gateway",
                method = %method,
                path = %path,
                expected,
                status = envelope.http_code(),
                "Write rejected"
            );
            return Err(WriteFailure { expected, envelope });
        }

        tracing::info!(target: "rest_gateway", method = %method, path = %path, "Write accepted");
        self.cache.invalidate_namespace(resource.cache_namespace()).await;
        Ok(envelope)
    }

    async fn fetch_json(&self, request: RequestDescriptor) -> Envelope<Value> {
        decode_json(self.transport.execute(request).await)
    }

    /// Absolute URL for an already-encoded relative path.
    ///
    /// Empty and dot segments are refused; URL parsing would collapse them
    /// and send the request to a different resource.
    fn url(&self, path: &str, query: &QueryOptions) -> Result<String, Envelope<Value>> {
        if path.split('/').any(|segment| matches!(segment, "" | "." | "..")) {
            tracing::warn!(target: "rest_gateway", path = %path, "Refusing request path");
            return Err(Envelope::failure(0, format!("Invalid request path {}", path)));
        }
        let base = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        reqwest::Url::parse_with_params(&base, query.iter())
            .map(|mut url| {
                if query.is_empty() {
                    url.set_query(None);
                }
                url.to_string()
            })
            .map_err(|e| Envelope::failure(0, format!("Invalid request URL {}: {}", base, e)))
    }
}

/// Decode a raw transport envelope's body as JSON.
///
/// Error envelopes keep their error; their body is kept only if it parses.
/// An empty successful body becomes an envelope without content.
pub(crate) fn decode_json(envelope: Envelope<String>) -> Envelope<Value> {
    let http_code = envelope.http_code();
    let error = envelope.error().map(str::to_string);
    let body = envelope.into_content();

    match error {
        Some(error) => {
            let content = body.and_then(|b| serde_json::from_str(&b).ok());
            Envelope::new(content, http_code, Some(error))
        }
        None => match body {
            Some(body) if !body.trim().is_empty() => match serde_json::from_str(&body) {
                Ok(value) => Envelope::success(value, http_code),
                Err(e) => Envelope::failure(http_code, format!("Invalid JSON response: {}", e)),
            },
            _ => Envelope::new(None, http_code, None),
        },
    }
}
