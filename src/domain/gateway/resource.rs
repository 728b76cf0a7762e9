//! Remote resource domains and their query rules.

use std::fmt;

/// A query option accepted by a resource, with its default if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionRule {
    pub name: &'static str,
    pub default: Option<&'static str>,
}

const fn allow(name: &'static str) -> OptionRule {
    OptionRule {
        name,
        default: None,
    }
}

const fn default(name: &'static str, value: &'static str) -> OptionRule {
    OptionRule {
        name,
        default: Some(value),
    }
}

/// Offset/limit paging shared by most list endpoints.
pub const PAGING_RULES: &[OptionRule] = &[default("offset", "0"), default("limit", "20")];

const ORDER_RULES: &[OptionRule] = &[
    default("offset", "0"),
    default("limit", "20"),
    allow("status"),
    allow("invoiceNumber"),
    allow("productId"),
    allow("placedBy"),
    allow("from"),
    allow("to"),
    allow("isRecurringOrder"),
    allow("format"),
];

const SUBSCRIPTION_RULES: &[OptionRule] = &[
    default("offset", "0"),
    default("limit", "20"),
    allow("status"),
    allow("userDefinedPlanName"),
    allow("userDefinedCustomerNameOrEmail"),
];

const CUSTOMER_RULES: &[OptionRule] = &[
    default("offset", "0"),
    default("limit", "20"),
    allow("status"),
    allow("email"),
    allow("name"),
    allow("from"),
    allow("to"),
];

const PRODUCT_RULES: &[OptionRule] = &[
    default("offset", "0"),
    default("limit", "20"),
    allow("userDefinedId"),
    allow("archived"),
    allow("excludeZeroSales"),
    allow("orderBy"),
    allow("from"),
    allow("to"),
];

const ABANDONED_CART_RULES: &[OptionRule] = &[
    default("limit", "20"),
    allow("continuationToken"),
    allow("timeRange"),
    allow("minimalValue"),
    allow("email"),
    allow("productId"),
];

/// Resource domains exposed by the remote REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Orders,
    Subscriptions,
    Customers,
    Discounts,
    Products,
    AbandonedCarts,
    ShippingMethods,
    GeneralSettings,
    DomainSettings,
    Dashboard,
}

impl Resource {
    /// Path relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Orders => "orders",
            Resource::Subscriptions => "subscriptions",
            Resource::Customers => "customers",
            Resource::Discounts => "discounts",
            Resource::Products => "products",
            Resource::AbandonedCarts => "carts/abandoned",
            Resource::ShippingMethods => "shipping_methods",
            Resource::GeneralSettings => "settings/general",
            Resource::DomainSettings => "settings/domain",
            Resource::Dashboard => "data",
        }
    }

    /// Cache namespace holding every segment of this resource.
    ///
    /// Both settings resources share one namespace.
    pub fn cache_namespace(&self) -> &'static str {
        match self {
            Resource::Orders => "orders",
            Resource::Subscriptions => "subscriptions",
            Resource::Customers => "customers",
            Resource::Discounts => "discounts",
            Resource::Products => "products",
            Resource::AbandonedCarts => "carts",
            Resource::ShippingMethods => "shipping",
            Resource::GeneralSettings | Resource::DomainSettings => "settings",
            Resource::Dashboard => "dashboard",
        }
    }

    /// Options accepted by the list endpoint of this resource.
    pub fn list_rules(&self) -> &'static [OptionRule] {
        match self {
            Resource::Orders => ORDER_RULES,
            Resource::Subscriptions => SUBSCRIPTION_RULES,
            Resource::Customers => CUSTOMER_RULES,
            Resource::Products => PRODUCT_RULES,
            Resource::AbandonedCarts => ABANDONED_CART_RULES,
            Resource::Discounts
            | Resource::ShippingMethods
            | Resource::GeneralSettings
            | Resource::DomainSettings
            | Resource::Dashboard => &[],
        }
    }

    /// Path of a single entity, `path/{id}`.
    ///
    /// The id is percent-encoded as one path segment, so `/`, `?` and `#`
    /// inside it stay part of the id.
    pub fn entity_path(&self, id: &str) -> String {
        format!("{}/{}", self.path(), urlencoding::encode(id))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
