//! HTTP transport port.
//!
//! The single seam through which every outbound call to the remote platform
//! passes. Implementations never fail: every outcome, including connection
//! errors and timeouts, is folded into an [`Envelope`].

use async_trait::async_trait;

use crate::domain::transport::{Envelope, RequestDescriptor};

/// Issues one HTTP request and normalizes its outcome.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute a request.
    ///
    /// Returns the raw response body as content. A non-2xx status yields an
    /// envelope with both the body and an error describing the status.
    async fn execute(&self, request: RequestDescriptor) -> Envelope<String>;
}
