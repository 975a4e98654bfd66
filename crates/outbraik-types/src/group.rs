//! Group identity: the (region, metric) pair is the unit of forecasting.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A categorical key identifying a geographic area in the dataset.
#[derive(
    Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    /// Creates a region key.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the region name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Region {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A disease case-count column, identified by the metric naming convention
/// (a fixed column-name suffix, e.g. `_cases`).
#[derive(
    Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Metric(String);

impl Metric {
    /// Creates a metric key from the full column name.
    pub fn new(column: impl Into<String>) -> Self {
        Self(column.into())
    }

    /// Returns the metric column name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Metric {
    fn from(column: &str) -> Self {
        Self::new(column)
    }
}

/// One (region, metric) pair.
///
/// Every group discovered in the dataset gets exactly one slot in the
/// bundle; no group is silently dropped.
#[derive(
    Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[display("{region}/{metric}")]
pub struct GroupKey {
    /// The geographic grouping key.
    pub region: Region,
    /// The forecasted metric column.
    pub metric: Metric,
}

impl GroupKey {
    /// Creates a group key.
    pub fn new(region: impl Into<Region>, metric: impl Into<Metric>) -> Self {
        Self {
            region: region.into(),
            metric: metric.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_key_display_joins_region_and_metric() {
        let key = GroupKey::new("Central", "dengue_cases");
        assert_eq!(key.to_string(), "Central/dengue_cases");
    }

    #[test]
    fn group_keys_order_by_region_then_metric() {
        let mut keys = vec![
            GroupKey::new("North", "dengue_cases"),
            GroupKey::new("Central", "malaria_cases"),
            GroupKey::new("Central", "dengue_cases"),
        ];
        keys.sort();
        assert_eq!(keys[0], GroupKey::new("Central", "dengue_cases"));
        assert_eq!(keys[2], GroupKey::new("North", "dengue_cases"));
    }
}
