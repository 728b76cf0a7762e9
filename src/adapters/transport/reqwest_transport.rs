//! reqwest-backed HTTP transport.
//!
//! Implements the `HttpTransport` port for the remote platform's REST API.
//!
//! # Authentication
//!
//! Credentials are fixed when the transport is built: HTTP Basic with the
//! secret key as user name and an empty password. The `Authorization`,
//! `Accept: application/json` and `Cache-Control: no-cache` headers are
//! installed as client defaults and sent with every request.
//!
//! # Configuration
//!
//! ```ignore
//! let config = TransportConfig::new()
//!     .with_secret_key("secret")
//!     .with_timeout(Duration::from_secs(10));
//! let transport = ReqwestTransport::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CACHE_CONTROL, USER_AGENT};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::config::RemoteConfig;
use crate::domain::transport::{Envelope, HttpMethod, RequestDescriptor};
use crate::ports::HttpTransport;

/// Default user agent sent when a request does not override it.
pub const DEFAULT_USER_AGENT: &str = concat!("storefront-gateway/", env!("CARGO_PKG_VERSION"));

/// Errors raised while building an HTTP client.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Invalid proxy URL: {0}")]
    InvalidProxy(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),
}

/// Process-wide transport defaults.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    secret_key: Option<SecretString>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
    pub proxy: Option<String>,
}

impl TransportConfig {
    pub fn new() -> Self {
        Self {
            secret_key: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
        }
    }

    /// Transport defaults from the remote section of the app config.
    pub fn from_remote(remote: &RemoteConfig) -> Self {
        Self {
            secret_key: remote.secret_key.clone(),
            timeout: remote.timeout(),
            connect_timeout: remote.connect_timeout(),
            user_agent: remote.user_agent.clone(),
            proxy: remote.proxy.clone(),
        }
    }

    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(SecretString::new(secret_key.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Whether a usable secret key is present.
    pub fn has_credentials(&self) -> bool {
        self.secret_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty())
    }

    /// `Basic base64(secretKey + ":")`.
    fn authorization_value(&self) -> Option<String> {
        self.secret_key
            .as_ref()
            .filter(|key| !key.expose_secret().is_empty())
            .map(|key| {
                let credentials = format!("{}:", key.expose_secret());
                format!("Basic {}", STANDARD.encode(credentials))
            })
    }

    fn default_headers(&self) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        if let Some(auth) = self.authorization_value() {
            let mut value = HeaderValue::from_str(&auth)
                .map_err(|_| TransportError::InvalidHeader("Authorization".to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    fn build_client(
        &self,
        connect_timeout: Duration,
        proxy: Option<&str>,
    ) -> Result<Client, TransportError> {
        let mut builder = Client::builder()
            .default_headers(self.default_headers()?)
            .user_agent(self.user_agent.clone())
            .connect_timeout(connect_timeout);

        if let Some(proxy) = proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| TransportError::InvalidProxy(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        builder
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP transport over a shared reqwest client.
pub struct ReqwestTransport {
    config: TransportConfig,
    client: Client,
}

impl ReqwestTransport {
    /// Build the transport and its shared client.
    ///
    /// # Errors
    ///
    /// Fails when the proxy URL or the credentials cannot be turned into a
    /// valid client configuration.
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let client = config.build_client(config.connect_timeout, config.proxy.as_deref())?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Client for a request: the shared one, or a dedicated one when the
    /// request overrides client-level settings.
    fn client_for(&self, request: &RequestDescriptor) -> Result<Client, TransportError> {
        if !request.needs_dedicated_client() {
            return Ok(self.client.clone());
        }
        let connect_timeout = request.connect_timeout.unwrap_or(self.config.connect_timeout);
        let proxy = request.proxy.as_deref().or(self.config.proxy.as_deref());
        self.config.build_client(connect_timeout, proxy)
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("Request timed out: {}", error)
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else {
        format!("Request failed: {}", error)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: RequestDescriptor) -> Envelope<String> {
        let client = match self.client_for(&request) {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(target: "transport", url = %request.url, error = %e, "Could not prepare client");
                return Envelope::failure(0, e.to_string());
            }
        };

        let mut builder = client
            .request(to_reqwest_method(request.method), &request.url)
            .timeout(request.timeout.unwrap_or(self.config.timeout));

        if let Some(user_agent) = &request.user_agent {
            builder = builder.header(USER_AGENT, user_agent.as_str());
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(target: "transport", method = %request.method, url = %request.url, "Sending request");

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let error = describe_error(&e);
                tracing::warn!(target: "transport", url = %request.url, error = %error, "Request failed");
                return Envelope::failure(0, error);
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                let error = describe_error(&e);
                tracing::warn!(target: "transport", url = %request.url, error = %error, "Failed to read response body");
                return Envelope::failure(status.as_u16(), error);
            }
        };

        if status.is_success() {
            Envelope::success(body, status.as_u16())
        } else {
            tracing::warn!(
                target: "transport",
                url = %request.url,
                status = status.as_u16(),
                "Unexpected response status"
            );
            Envelope::new(Some(body), status.as_u16(), Some(format!("HTTP {}", status)))
        }
    }
}
