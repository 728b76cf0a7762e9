//! Result envelope - the normalized outcome of every remote call.
//!
//! Success and failure share one shape: `{content, http_code, error}`.
//! Transport failures never surface as `Err`; callers inspect the envelope.

use serde::{Deserialize, Serialize};

/// Error text used when the gateway has no API key to authenticate with.
pub const NOT_CONFIGURED_ERROR: &str = "No API key configured";

/// Normalized result of a remote call.
///
/// `http_code` is `0` when no HTTP response was received (connect failure,
/// timeout, missing configuration).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    content: Option<T>,
    http_code: u16,
    error: Option<String>,
}

impl<T> Envelope<T> {
    /// Create an envelope from its parts.
    pub fn new(content: Option<T>, http_code: u16, error: Option<String>) -> Self {
        Self {
            content,
            http_code,
            error,
        }
    }

    /// A successful result.
    pub fn success(content: T, http_code: u16) -> Self {
        Self::new(Some(content), http_code, None)
    }

    /// A failed result without content.
    pub fn failure(http_code: u16, error: impl Into<String>) -> Self {
        Self::new(None, http_code, Some(error.into()))
    }

    /// The failure returned when no credentials are configured.
    pub fn not_configured() -> Self {
        Self::failure(0, NOT_CONFIGURED_ERROR)
    }

    pub fn content(&self) -> Option<&T> {
        self.content.as_ref()
    }

    pub fn into_content(self) -> Option<T> {
        self.content
    }

    pub fn http_code(&self) -> u16 {
        self.http_code
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True when the call completed without an error.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
