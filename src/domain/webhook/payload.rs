//! Webhook payload decoding and schema validation.

use serde_json::{Map, Value};

use super::errors::WebhookError;
use super::event::{EventName, Mode};

/// A validated webhook payload.
///
/// `content` is whatever the platform sent under that key, including
/// `null` or an empty object.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookPayload {
    pub event_name: EventName,
    pub mode: Mode,
    pub content: Value,
}

impl WebhookPayload {
    /// Decode the raw body and check the required fields.
    ///
    /// # Errors
    ///
    /// - `InvalidPayload` - body is not JSON, or not a JSON object
    /// - `MissingField` - `eventName`, `mode` or `content` absent
    /// - `UnknownEvent` - `eventName` is not a supported event
    /// - `InvalidMode` - `mode` is not exactly `Live` or `Test`
    pub fn parse(raw: &[u8]) -> Result<Self, WebhookError> {
        let value: Value = serde_json::from_slice(raw)
            .map_err(|e| WebhookError::InvalidPayload(format!("Invalid JSON: {}", e)))?;

        let mut object = match value {
            Value::Object(object) => object,
            other => {
                return Err(WebhookError::InvalidPayload(format!(
                    "expected a JSON object, got {}",
                    json_type(&other)
                )))
            }
        };

        let event_name = required_str(&object, "eventName")?
            .parse::<EventName>()
            .map_err(|e| WebhookError::UnknownEvent(e.0))?;

        let mode_value = required_str(&object, "mode")?;
        let mode =
            Mode::parse(mode_value).ok_or_else(|| WebhookError::InvalidMode(mode_value.to_string()))?;

        let content = object
            .remove("content")
            .ok_or(WebhookError::MissingField("content"))?;

        Ok(Self {
            event_name,
            mode,
            content,
        })
    }
}

fn required_str<'a>(object: &'a Map<String, Value>, field: &'static str) -> Result<&'a str, WebhookError> {
    match object.get(field) {
        None => Err(WebhookError::MissingField(field)),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(WebhookError::InvalidPayload(format!(
            "{} must be a string, got {}",
            field,
            json_type(other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
