//! Dashboard aggregate accessor.
//!
//! Issues the fixed set of dashboard queries as one batch and returns the
//! raw envelopes keyed by URL. Turning them into display values is left to
//! the caller.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};

use super::{ReadOptions, RestGateway};
use crate::application::batch::RequestBatch;
use crate::domain::gateway::{QueryOptions, Resource, SegmentKey};
use crate::domain::transport::{BatchResults, Envelope, RequestDescriptor};

const TOP_LIST_LIMIT: &str = "6";
const RECENT_ORDERS_LIMIT: &str = "10";

/// Reporting window for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardPeriod {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub currency: Option<String>,
}

impl DashboardPeriod {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from,
            to,
            currency: None,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    fn range(&self) -> Vec<(&'static str, String)> {
        vec![
            ("from", self.from.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("to", self.to.to_rfc3339_opts(SecondsFormat::Secs, true)),
        ]
    }

    fn range_with_currency(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.range();
        if let Some(currency) = &self.currency {
            pairs.push(("currency", currency.clone()));
        }
        pairs
    }

    /// `(path, query)` of every dashboard query.
    fn queries(&self) -> Vec<(&'static str, QueryOptions)> {
        vec![
            ("data/performance", with(self.range_with_currency(), &[])),
            ("data/orders/sales", with(self.range_with_currency(), &[])),
            ("data/orders/count", with(self.range(), &[])),
            (
                Resource::Customers.path(),
                with(self.range(), &[("limit", TOP_LIST_LIMIT), ("orderBy", "TotalSpent")]),
            ),
            (
                Resource::Products.path(),
                with(self.range(), &[("limit", TOP_LIST_LIMIT), ("orderBy", "SalesValue")]),
            ),
            (
                Resource::Orders.path(),
                with(
                    self.range(),
                    &[("limit", RECENT_ORDERS_LIMIT), ("offset", "0"), ("format", "Excerpt")],
                ),
            ),
        ]
    }
}

fn with(mut pairs: Vec<(&'static str, String)>, extra: &[(&'static str, &str)]) -> QueryOptions {
    pairs.extend(extra.iter().map(|(k, v)| (*k, v.to_string())));
    QueryOptions::from_pairs(pairs)
}

impl RestGateway {
    /// Run the dashboard queries as one batch.
    ///
    /// Returns one envelope per query URL. Only `ttl` and `force_refresh`
    /// of `options` apply; the result is cached as a whole when every
    /// query succeeded.
    pub async fn dashboard(&self, period: &DashboardPeriod, options: ReadOptions) -> BatchResults {
        let mut urls = Vec::new();
        let mut results = HashMap::new();
        for (path, query) in period.queries() {
            match self.url(path, &query) {
                Ok(url) => urls.push(url),
                Err(envelope) => {
                    let failed = envelope.error().unwrap_or_default().to_string();
                    results.insert(path.to_string(), Envelope::failure(0, failed));
                }
            }
        }

        if !self.config.credentials_configured {
            tracing::warn!(target: "rest_gateway", "Dashboard skipped, no API key configured");
            results.extend(urls.into_iter().map(|url| (url, Envelope::not_configured())));
            return results;
        }
        if !results.is_empty() {
            results.extend(urls.into_iter().map(|url| (url, Envelope::failure(0, "Batch not sent"))));
            return results;
        }

        let namespace = Resource::Dashboard.cache_namespace();
        let segment = SegmentKey::derive(
            namespace,
            Resource::Dashboard.path(),
            &QueryOptions::from_pairs(period.range_with_currency()),
        );
        if options.force_refresh {
            self.cache.invalidate(&segment).await;
        }
        let ttl = options.ttl.unwrap_or(self.config.default_ttl);

        self.cache
            .get_or_compute(&segment, ttl, || async {
                let mut batch = RequestBatch::new(self.transport.clone(), self.config.batch_mode);
                for url in urls {
                    batch.enqueue(RequestDescriptor::get(url));
                }
                match batch.execute().await {
                    Ok(results) => results,
                    Err(e) => {
                        tracing::error!(target: "rest_gateway", error = %e, "Dashboard batch failed");
                        HashMap::new()
                    }
                }
            })
            .await
    }
}
