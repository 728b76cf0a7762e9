//! Webhook error types.
//!
//! Every failure maps to a fixed HTTP status. No detail is returned to the
//! remote platform; the message is for operator logs only.

use axum::http::StatusCode;
use thiserror::Error;

/// Processing stages of an inbound webhook request, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WebhookStage {
    Entry,
    MethodContentTypeCheck,
    TokenPresentCheck,
    HandshakeCheck,
    PayloadSchemaCheck,
    EventDispatch,
    ResponseEmitted,
}

/// Errors that terminate webhook processing.
#[derive(Debug, Error, PartialEq)]
pub enum WebhookError {
    /// Request method was not POST.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// Content type missing or not JSON.
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// Request token header absent.
    #[error("Missing request token header: {0}")]
    MissingToken(String),

    /// Token validation against the remote platform failed.
    #[error("Handshake failed: {0}")]
    HandshakeFailed(String),

    /// Body is not a JSON object.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Required top-level payload field missing.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// Field required by an event handler missing from `content`.
    #[error("Missing content field: {0}")]
    MissingContentField(&'static str),

    /// `eventName` is not one of the supported events.
    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    /// `mode` is not exactly `Live` or `Test`.
    #[error("Invalid mode: {0}")]
    InvalidMode(String),

    /// Test mode payload received while live mode is required.
    #[error("Test mode events not allowed")]
    TestModeRejected,

    /// Event content has the wrong shape for its handler.
    #[error("Invalid content: {0}")]
    InvalidContent(String),
}

impl WebhookError {
    /// The stage at which this error stops processing.
    pub fn stage(&self) -> WebhookStage {
        match self {
            WebhookError::MethodNotAllowed(_) | WebhookError::UnsupportedContentType(_) => {
                WebhookStage::MethodContentTypeCheck
            }
            WebhookError::MissingToken(_) => WebhookStage::TokenPresentCheck,
            WebhookError::HandshakeFailed(_) => WebhookStage::HandshakeCheck,
            WebhookError::InvalidPayload(_)
            | WebhookError::MissingField(_)
            | WebhookError::UnknownEvent(_)
            | WebhookError::InvalidMode(_)
            | WebhookError::TestModeRejected => WebhookStage::PayloadSchemaCheck,
            WebhookError::MissingContentField(_) | WebhookError::InvalidContent(_) => {
                WebhookStage::EventDispatch
            }
        }
    }

    /// Maps the error to the status returned to the remote platform.
    ///
    /// Transport and handshake failures answer 404 so the endpoint does not
    /// reveal itself to callers that cannot prove their origin.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MethodNotAllowed(_)
            | WebhookError::UnsupportedContentType(_)
            | WebhookError::MissingToken(_)
            | WebhookError::HandshakeFailed(_) => StatusCode::NOT_FOUND,

            WebhookError::InvalidPayload(_)
            | WebhookError::MissingField(_)
            | WebhookError::MissingContentField(_)
            | WebhookError::UnknownEvent(_)
            | WebhookError::InvalidMode(_)
            | WebhookError::TestModeRejected
            | WebhookError::InvalidContent(_) => StatusCode::BAD_REQUEST,
        }
    }
}
