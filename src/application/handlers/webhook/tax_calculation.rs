//! `taxes.calculate` handler.
//!
//! Reads the cart items (and shipping fees, when present) from the event
//! content and answers with the computed taxes:
//!
//! ```json
//! {"taxes": [{"name": "VAT", "amount": 3.0, "rate": 0.2,
//!             "numberForInvoice": "VAT-01", "includedInPrice": false}]}
//! ```

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::{json, Value};

use super::handler_table::WebhookEventHandler;
use super::WebhookResponse;
use crate::config::TaxConfig;
use crate::domain::webhook::{CartItem, TaxCalculator, WebhookError, WebhookPayload};

pub struct TaxCalculationHandler {
    taxes: TaxConfig,
}

impl TaxCalculationHandler {
    pub fn new(taxes: TaxConfig) -> Self {
        Self { taxes }
    }
}

#[async_trait]
impl WebhookEventHandler for TaxCalculationHandler {
    async fn handle(&self, payload: &WebhookPayload) -> Result<WebhookResponse, WebhookError> {
        let items = payload
            .content
            .get("items")
            .ok_or(WebhookError::MissingContentField("items"))?;
        let items: Vec<CartItem> = serde_json::from_value(items.clone())
            .map_err(|e| WebhookError::InvalidContent(format!("items: {}", e)))?;

        let shipping_fees = payload
            .content
            .pointer("/shippingInformation/fees")
            .and_then(Value::as_f64);

        let lines = TaxCalculator::new(&self.taxes.rates, self.taxes.included_in_price)
            .with_shipping(self.taxes.shipping_mode, self.taxes.shipping_tax_name.as_deref())
            .calculate(&items, shipping_fees);

        tracing::info!(
            target: "webhooks",
            items = items.len(),
            taxes = lines.len(),
            mode = payload.mode.as_str(),
            "Taxes calculated"
        );

        Ok(WebhookResponse::json(StatusCode::OK, json!({ "taxes": lines })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::webhook::{ShippingTaxMode, TaxRate};

    fn config() -> TaxConfig {
        TaxConfig {
            included_in_price: false,
            rates: vec![TaxRate {
                name: "VAT".to_string(),
                rate: 0.20,
                number_for_invoice: "VAT-01".to_string(),
            }],
            shipping_mode: ShippingTaxMode::None,
            shipping_tax_name: None,
        }
    }

    fn payload(content: Value) -> WebhookPayload {
        let raw = serde_json::to_vec(&json!({
            "eventName": "taxes.calculate",
            "mode": "Test",
            "content": content,
        }))
        .unwrap();
        WebhookPayload::parse(&raw).unwrap()
    }

    #[tokio::test]
    async fn computes_taxes_for_taxable_items() {
        let handler = TaxCalculationHandler::new(config());
        let content = json!({
            "items": [
                {"taxable": true, "taxes": ["VAT"], "totalPriceWithoutTaxes": 10.00},
                {"taxable": true, "taxes": ["VAT"], "totalPriceWithoutTaxes": 5.00},
                {"taxable": false, "taxes": ["VAT"], "totalPriceWithoutTaxes": 99.00}
            ]
        });

        let response = handler.handle(&payload(content)).await.unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.body,
            Some(json!({"taxes": [{
                "name": "VAT",
                "amount": 3.0,
                "rate": 0.2,
                "numberForInvoice": "VAT-01",
                "includedInPrice": false
            }]}))
        );
    }

    #[tokio::test]
    async fn missing_items_is_a_bad_request() {
        let handler = TaxCalculationHandler::new(config());

        let err = handler.handle(&payload(json!({}))).await.unwrap_err();

        assert_eq!(err, WebhookError::MissingContentField("items"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_items_are_rejected() {
        let handler = TaxCalculationHandler::new(config());

        let err = handler
            .handle(&payload(json!({"items": "nope"})))
            .await
            .unwrap_err();

        assert!(matches!(err, WebhookError::InvalidContent(_)));
    }

    #[tokio::test]
    async fn empty_cart_yields_no_taxes() {
        let handler = TaxCalculationHandler::new(config());

        let response = handler.handle(&payload(json!({"items": []}))).await.unwrap();

        assert_eq!(response.body, Some(json!({"taxes": []})));
    }

    #[tokio::test]
    async fn shipping_fees_follow_configured_mode() {
        let handler = TaxCalculationHandler::new(TaxConfig {
            shipping_mode: ShippingTaxMode::Fixed,
            shipping_tax_name: Some("VAT".to_string()),
            ..config()
        });
        let content = json!({
            "items": [{"taxable": true, "taxes": ["VAT"], "totalPriceWithoutTaxes": 10.00}],
            "shippingInformation": {"fees": 5.00, "method": "Standard"}
        });

        let response = handler.handle(&payload(content)).await.unwrap();

        assert_eq!(response.body.unwrap()["taxes"][0]["amount"], json!(3.0));
    }
}
