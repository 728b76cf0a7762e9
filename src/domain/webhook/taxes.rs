//! Tax calculation for cart contents.
//!
//! Each taxable item is attributed to the first tax listed on it; only one
//! tax per item is supported. Totals are summed per tax name and the amount
//! is computed from the configured rate.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A configured tax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRate {
    pub name: String,
    /// Fraction, e.g. `0.2` for 20%.
    pub rate: f64,
    #[serde(default)]
    pub number_for_invoice: String,
}

/// How shipping fees are taxed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingTaxMode {
    /// Shipping is not taxed.
    #[default]
    None,
    /// All fees go to one configured tax.
    Fixed,
    /// All fees go to the highest-rate tax present in the cart.
    HighestRate,
    /// Fees are split across cart taxes in proportion to their item totals.
    Split,
}

/// A cart line item as sent with `taxes.calculate`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(default)]
    pub taxable: bool,
    #[serde(default)]
    pub taxes: Vec<String>,
    #[serde(default)]
    pub total_price_without_taxes: f64,
}

/// One computed tax, serialized in the shape the platform expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxLine {
    pub name: String,
    pub amount: f64,
    pub rate: f64,
    pub number_for_invoice: String,
    pub included_in_price: bool,
}

/// Round to two decimals.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Tax amount for a value at `rate`.
///
/// When the tax is already included, the amount is extracted from the
/// gross value instead of added on top.
pub fn calculate_tax(value: f64, rate: f64, included_in_price: bool) -> f64 {
    let tax = if included_in_price {
        value / (1.0 + rate) * rate
    } else {
        value * rate
    };
    round_cents(tax)
}

/// Computes cart taxes from a rate table.
#[derive(Debug, Clone)]
pub struct TaxCalculator<'a> {
    rates: &'a [TaxRate],
    included_in_price: bool,
    shipping_mode: ShippingTaxMode,
    shipping_tax_name: Option<&'a str>,
}

impl<'a> TaxCalculator<'a> {
    pub fn new(rates: &'a [TaxRate], included_in_price: bool) -> Self {
        Self {
            rates,
            included_in_price,
            shipping_mode: ShippingTaxMode::None,
            shipping_tax_name: None,
        }
    }

    pub fn with_shipping(mut self, mode: ShippingTaxMode, tax_name: Option<&'a str>) -> Self {
        self.shipping_mode = mode;
        self.shipping_tax_name = tax_name;
        self
    }

    fn rate(&self, name: &str) -> Option<&'a TaxRate> {
        self.rates.iter().find(|r| r.name == name)
    }

    /// Compute one line per tax that has an attributed total.
    ///
    /// Lines follow the order of the rate table.
    pub fn calculate(&self, items: &[CartItem], shipping_fees: Option<f64>) -> Vec<TaxLine> {
        let mut totals: HashMap<&str, f64> = HashMap::new();

        for item in items.iter().filter(|item| item.taxable) {
            let Some(name) = item.taxes.first() else {
                continue;
            };
            match self.rate(name) {
                Some(rate) => {
                    *totals.entry(rate.name.as_str()).or_insert(0.0) +=
                        item.total_price_without_taxes;
                }
                None => {
                    tracing::warn!(target: "webhooks", tax = %name, "No rate configured for item tax");
                }
            }
        }

        if let Some(fees) = shipping_fees.filter(|fees| *fees > 0.0) {
            self.attribute_shipping(&mut totals, fees);
        }

        self.rates
            .iter()
            .filter_map(|rate| {
                totals.get(rate.name.as_str()).map(|total| TaxLine {
                    name: rate.name.clone(),
                    amount: calculate_tax(*total, rate.rate, self.included_in_price),
                    rate: rate.rate,
                    number_for_invoice: rate.number_for_invoice.clone(),
                    included_in_price: self.included_in_price,
                })
            })
            .collect()
    }

    fn attribute_shipping(&self, totals: &mut HashMap<&'a str, f64>, fees: f64) {
        match self.shipping_mode {
            ShippingTaxMode::None => {}
            ShippingTaxMode::Fixed => {
                match self.shipping_tax_name.and_then(|name| self.rate(name)) {
                    Some(rate) => *totals.entry(rate.name.as_str()).or_insert(0.0) += fees,
                    None => tracing::warn!(target: "webhooks", "Fixed shipping tax not configured"),
                }
            }
            ShippingTaxMode::HighestRate => {
                let highest = self
                    .rates
                    .iter()
                    .filter(|rate| totals.contains_key(rate.name.as_str()))
                    .max_by(|a, b| a.rate.total_cmp(&b.rate));
                if let Some(rate) = highest {
                    *totals.entry(rate.name.as_str()).or_insert(0.0) += fees;
                }
            }
            ShippingTaxMode::Split => {
                let sum: f64 = totals.values().sum();
                if sum > 0.0 {
                    for total in totals.values_mut() {
                        *total += fees * (*total / sum);
                    }
                }
            }
        }
    }
}
