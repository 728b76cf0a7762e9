//! Store settings accessors.

use super::{ReadOptions, ResourceResult, RestGateway};
use crate::domain::gateway::Resource;

impl RestGateway {
    pub async fn shipping_methods(&self, options: ReadOptions) -> ResourceResult {
        self.read_list(Resource::ShippingMethods, options).await
    }

    /// General settings, including the configured currencies.
    pub async fn general_settings(&self, options: ReadOptions) -> ResourceResult {
        self.read_list(Resource::GeneralSettings, options).await
    }

    pub async fn domain_settings(&self, options: ReadOptions) -> ResourceResult {
        self.read_list(Resource::DomainSettings, options).await
    }
}
