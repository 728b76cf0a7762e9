//! Webhook event names and payload modes.

use std::fmt;
use std::str::FromStr;

/// Events the remote platform delivers to the webhook endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    OrderCompleted,
    OrderStatusChanged,
    OrderPaymentStatusChanged,
    OrderTrackingNumberChanged,
    SubscriptionCreated,
    SubscriptionCancelled,
    SubscriptionPaused,
    SubscriptionResumed,
    SubscriptionInvoiceCreated,
    ShippingRatesFetch,
    TaxesCalculate,
    CustomerUpdated,
}

impl EventName {
    pub const ALL: [EventName; 12] = [
        EventName::OrderCompleted,
        EventName::OrderStatusChanged,
        EventName::OrderPaymentStatusChanged,
        EventName::OrderTrackingNumberChanged,
        EventName::SubscriptionCreated,
        EventName::SubscriptionCancelled,
        EventName::SubscriptionPaused,
        EventName::SubscriptionResumed,
        EventName::SubscriptionInvoiceCreated,
        EventName::ShippingRatesFetch,
        EventName::TaxesCalculate,
        EventName::CustomerUpdated,
    ];

    /// Wire name as sent in `eventName`.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::OrderCompleted => "order.completed",
            EventName::OrderStatusChanged => "order.status.changed",
            EventName::OrderPaymentStatusChanged => "order.paymentStatus.changed",
            EventName::OrderTrackingNumberChanged => "order.trackingNumber.changed",
            EventName::SubscriptionCreated => "subscription.created",
            EventName::SubscriptionCancelled => "subscription.cancelled",
            EventName::SubscriptionPaused => "subscription.paused",
            EventName::SubscriptionResumed => "subscription.resumed",
            EventName::SubscriptionInvoiceCreated => "subscription.invoice.created",
            EventName::ShippingRatesFetch => "shippingrates.fetch",
            EventName::TaxesCalculate => "taxes.calculate",
            EventName::CustomerUpdated => "customauth:customer_updated",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a supported event name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEventName(pub String);

impl FromStr for EventName {
    type Err = UnknownEventName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventName::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| UnknownEventName(s.to_string()))
    }
}

/// Whether the payload originates from the live or the test environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Live,
    Test,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Live => "Live",
            Mode::Test => "Test",
        }
    }

    /// Parse the exact wire value; anything else is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Live" => Some(Mode::Live),
            "Test" => Some(Mode::Test),
            _ => None,
        }
    }
}
