//! Webhook domain: events, payload schema, errors and tax calculation.

mod errors;
mod event;
mod payload;
mod taxes;

pub use errors::{WebhookError, WebhookStage};
pub use event::{EventName, Mode, UnknownEventName};
pub use payload::WebhookPayload;
pub use taxes::{
    calculate_tax, round_cents, CartItem, ShippingTaxMode, TaxCalculator, TaxLine, TaxRate,
};
