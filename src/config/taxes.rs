//! Tax table configuration

use std::collections::HashSet;

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::webhook::{ShippingTaxMode, TaxRate};

/// Tax configuration used by `taxes.calculate`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaxConfig {
    /// Prices already include taxes
    #[serde(default)]
    pub included_in_price: bool,

    /// Configured taxes, in output order
    #[serde(default)]
    pub rates: Vec<TaxRate>,

    #[serde(default)]
    pub shipping_mode: ShippingTaxMode,

    /// Tax receiving shipping fees in `fixed` mode
    pub shipping_tax_name: Option<String>,
}

impl TaxConfig {
    /// Validate tax configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for rate in &self.rates {
            if !(0.0..=1.0).contains(&rate.rate) {
                return Err(ValidationError::InvalidTaxRate(rate.name.clone()));
            }
            if !seen.insert(rate.name.as_str()) {
                return Err(ValidationError::DuplicateTaxName(rate.name.clone()));
            }
        }

        if self.shipping_mode == ShippingTaxMode::Fixed {
            let name = self
                .shipping_tax_name
                .as_deref()
                .ok_or(ValidationError::MissingRequired("TAXES__SHIPPING_TAX_NAME"))?;
            if !seen.contains(name) {
                return Err(ValidationError::UnknownShippingTax(name.to_string()));
            }
        }

        Ok(())
    }
}
