//! The artifact bundle: every group's result for one run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ForecastResult, GroupError, GroupKey};

/// One bundle slot: either a stamped forecast or an explicit marker that the
/// group's forecast is unavailable, with the reason.
///
/// Recording failed groups (instead of dropping them) is what lets the
/// serving layer distinguish "forecast failed" from "no such group".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupArtifact {
    /// A completed, hash-stamped forecast.
    Forecast(ForecastResult),
    /// The group could not be forecast.
    Unavailable {
        /// Why the group has no forecast.
        error: String,
    },
}

impl GroupArtifact {
    /// Records a group-local failure as an unavailable slot.
    #[must_use]
    pub fn unavailable(error: &GroupError) -> Self {
        Self::Unavailable {
            error: error.to_string(),
        }
    }

    /// Returns the forecast if this slot holds one.
    #[must_use]
    pub const fn as_forecast(&self) -> Option<&ForecastResult> {
        match self {
            Self::Forecast(result) => Some(result),
            Self::Unavailable { .. } => None,
        }
    }
}

/// Mapping from region to metric to per-group artifact.
///
/// Owned by the artifact store; constructed fresh each run and persisted as a
/// single snapshot. `BTreeMap` keys give a stable region-then-metric
/// iteration order, so serialized output diffs deterministically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bundle {
    regions: BTreeMap<String, BTreeMap<String, GroupArtifact>>,
}

impl Bundle {
    /// Creates an empty bundle.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            regions: BTreeMap::new(),
        }
    }

    /// Inserts a group's artifact. Each group owns exactly one slot.
    pub fn insert(&mut self, key: &GroupKey, artifact: GroupArtifact) {
        self.regions
            .entry(key.region.as_str().to_string())
            .or_default()
            .insert(key.metric.as_str().to_string(), artifact);
    }

    /// Looks up the slot for a (region, metric) pair.
    #[must_use]
    pub fn get(&self, region: &str, metric: &str) -> Option<&GroupArtifact> {
        self.regions.get(region)?.get(metric)
    }

    /// Iterates all slots in region-then-metric order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &GroupArtifact)> {
        self.regions.iter().flat_map(|(region, metrics)| {
            metrics
                .iter()
                .map(move |(metric, artifact)| (region.as_str(), metric.as_str(), artifact))
        })
    }

    /// Iterates region names in sorted order.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    /// Total number of slots across all regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.values().map(BTreeMap::len).sum()
    }

    /// Returns true if the bundle has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Number of slots holding a completed forecast.
    #[must_use]
    pub fn forecast_count(&self) -> usize {
        self.iter()
            .filter(|(_, _, artifact)| artifact.as_forecast().is_some())
            .count()
    }

    /// Number of slots marked unavailable.
    #[must_use]
    pub fn unavailable_count(&self) -> usize {
        self.len() - self.forecast_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_key_by_region_then_metric() {
        let mut bundle = Bundle::new();
        bundle.insert(
            &GroupKey::new("North", "dengue_cases"),
            GroupArtifact::Unavailable {
                error: "x".to_string(),
            },
        );
        bundle.insert(
            &GroupKey::new("Central", "dengue_cases"),
            GroupArtifact::Unavailable {
                error: "y".to_string(),
            },
        );

        let order: Vec<_> = bundle.iter().map(|(r, m, _)| (r, m)).collect();
        assert_eq!(
            order,
            vec![("Central", "dengue_cases"), ("North", "dengue_cases")]
        );
        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.unavailable_count(), 2);
    }

    #[test]
    fn unavailable_slot_serializes_as_error_object() {
        let mut bundle = Bundle::new();
        bundle.insert(
            &GroupKey::new("Central", "dengue_cases"),
            GroupArtifact::unavailable(&GroupError::InsufficientData {
                required: 3,
                actual: 1,
            }),
        );

        let json = serde_json::to_value(&bundle).unwrap();
        assert!(
            json["Central"]["dengue_cases"]["error"]
                .as_str()
                .unwrap()
                .contains("insufficient data")
        );
    }

    #[test]
    fn round_trips_through_json() {
        let mut bundle = Bundle::new();
        bundle.insert(
            &GroupKey::new("Central", "dengue_cases"),
            GroupArtifact::Unavailable {
                error: "model fit failed: no convergence".to_string(),
            },
        );

        let text = serde_json::to_string(&bundle).unwrap();
        let back: Bundle = serde_json::from_str(&text).unwrap();
        assert_eq!(back, bundle);
    }
}
