//! Forecast output types, shaped for the dashboard artifact.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::GroupKey;

/// One forecasted period: a point estimate with its credible interval.
///
/// There is no constructed invariant that `yhat_lower <= yhat <= yhat_upper`;
/// that is a property of the fitted model, tested but not guaranteed here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// The period this point refers to.
    pub date: NaiveDate,
    /// Central estimate.
    pub yhat: f64,
    /// Lower credible bound.
    pub yhat_lower: f64,
    /// Upper credible bound.
    pub yhat_upper: f64,
}

impl ForecastPoint {
    /// Creates a forecast point.
    #[must_use]
    pub const fn new(date: NaiveDate, yhat: f64, yhat_lower: f64, yhat_upper: f64) -> Self {
        Self {
            date,
            yhat,
            yhat_lower,
            yhat_upper,
        }
    }
}

/// The forecast for one (region, metric) group.
///
/// Created once per group per run. Immutable once the `sha256` stamp is
/// attached; the stamp covers the payload *without* the `sha256` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// The group's region.
    pub region: String,
    /// The group's metric column (the artifact calls this `disease`).
    pub disease: String,
    /// When this result was generated (UTC, whole seconds).
    pub generated_at: DateTime<Utc>,
    /// Trailing window of in-sample and projected periods, oldest first.
    pub forecast: Vec<ForecastPoint>,
    /// Content hash over the canonical payload, absent until stamped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

impl ForecastResult {
    /// Creates an unstamped result for a group, timestamped now.
    ///
    /// The generation timestamp is truncated to whole seconds so the
    /// serialized form stays a plain `...Z` ISO-8601 instant.
    #[must_use]
    pub fn new(key: &GroupKey, forecast: Vec<ForecastPoint>) -> Self {
        let now = Utc::now();
        Self {
            region: key.region.as_str().to_string(),
            disease: key.metric.as_str().to_string(),
            generated_at: now.with_nanosecond(0).unwrap_or(now),
            forecast,
            sha256: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn wire_shape_matches_dashboard_contract() {
        let key = GroupKey::new("Central", "dengue_cases");
        let mut result = ForecastResult::new(&key, vec![ForecastPoint::new(d(2024, 5, 1), 3.0, 1.0, 5.0)]);
        result.sha256 = Some("ab".repeat(32));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["region"], "Central");
        assert_eq!(json["disease"], "dengue_cases");
        assert_eq!(json["forecast"][0]["date"], "2024-05-01");
        assert_eq!(json["forecast"][0]["yhat"], 3.0);
        assert_eq!(json["sha256"].as_str().unwrap().len(), 64);

        let generated_at = json["generated_at"].as_str().unwrap();
        assert!(generated_at.ends_with('Z'), "got {generated_at}");
    }

    #[test]
    fn unstamped_result_omits_sha256_field() {
        let key = GroupKey::new("Central", "dengue_cases");
        let result = ForecastResult::new(&key, vec![]);
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("sha256").is_none());
    }
}
