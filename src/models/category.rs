//! Quota categories.
//!
//! A run works against a closed set of reservation buckets. Each college
//! carries one seat counter per bucket, and a student can only ever be
//! admitted under the bucket matching their declared category.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default quota buckets, in seat-file column order.
pub const DEFAULT_CATEGORIES: [&str; 6] = ["SC", "SC-CC", "ST", "BC", "Minority", "OC"];

/// A single quota bucket name (e.g. `"SC"`, `"OC"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuotaCategory(String);

impl QuotaCategory {
    /// Creates a category from its name (trimmed).
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().trim().to_string())
    }

    /// The category name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuotaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of quota buckets for one run.
///
/// Membership is exact (case-sensitive) after trimming: `"sc"` is not `"SC"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySet {
    categories: Vec<QuotaCategory>,
}

impl CategorySet {
    /// Builds a set from names, keeping first-seen order and skipping
    /// duplicates and blank names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut categories: Vec<QuotaCategory> = Vec::new();
        for name in names {
            let cat = QuotaCategory::new(name);
            if !cat.as_str().is_empty() && !categories.contains(&cat) {
                categories.push(cat);
            }
        }
        Self { categories }
    }

    /// Returns the bucket matching a raw category value, if any.
    pub fn recognize(&self, raw: &str) -> Option<&QuotaCategory> {
        let raw = raw.trim();
        self.categories.iter().find(|c| c.as_str() == raw)
    }

    /// Whether `raw` names a bucket of this set.
    pub fn contains(&self, raw: &str) -> bool {
        self.recognize(raw).is_some()
    }

    /// Iterates buckets in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &QuotaCategory> {
        self.categories.iter()
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the set has no buckets.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES)
    }
}
