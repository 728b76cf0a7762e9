//! Query option resolution.
//!
//! Caller-supplied filters are reduced to the keys a resource accepts, and
//! missing keys are filled from the resource defaults. The result is ordered
//! so equivalent inputs always produce the same query.

use std::collections::BTreeMap;

use super::resource::OptionRule;

/// Raw filter options as supplied by a caller.
pub type FilterOptions = BTreeMap<String, String>;

/// Allow-listed, defaulted and ordered query options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions(BTreeMap<String, String>);

impl QueryOptions {
    /// Resolve raw filters against a set of option rules.
    pub fn resolve(filters: &FilterOptions, rules: &[OptionRule]) -> Self {
        let mut resolved = BTreeMap::new();
        for rule in rules {
            match filters.get(rule.name) {
                Some(value) => {
                    resolved.insert(rule.name.to_string(), value.clone());
                }
                None => {
                    if let Some(default) = rule.default {
                        resolved.insert(rule.name.to_string(), default.to_string());
                    }
                }
            }
        }
        Self(resolved)
    }

    /// Build from pairs without any allow-listing.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Canonical `key=value&...` form used for hashing.
    ///
    /// Keys and values are percent-encoded, so a value containing `&` or
    /// `=` cannot read as another option set.
    pub fn canonical(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
