//! Ordered, gap-filled univariate time series.

use chrono::NaiveDate;

/// A univariate time series for one (region, metric) group.
///
/// Invariants enforced at construction:
///
/// - dates ascend strictly (duplicates collapse, last occurrence wins)
/// - no missing values: nulls are replaced with `0.0` (explicit zero-fill,
///   not interpolation)
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl Series {
    /// Builds a series from raw (date, optional value) observations.
    ///
    /// Observations are sorted by date ascending. When the same date appears
    /// more than once, the last occurrence in input order wins. Missing
    /// values become `0.0`.
    #[must_use]
    pub fn from_observations(observations: Vec<(NaiveDate, Option<f64>)>) -> Self {
        let mut indexed: Vec<(usize, NaiveDate, Option<f64>)> = observations
            .into_iter()
            .enumerate()
            .map(|(i, (date, value))| (i, date, value))
            .collect();
        // Stable order: date first, then original position so that the last
        // input occurrence of a duplicated date ends up last.
        indexed.sort_by_key(|&(i, date, _)| (date, i));

        let mut dates: Vec<NaiveDate> = Vec::with_capacity(indexed.len());
        let mut values: Vec<f64> = Vec::with_capacity(indexed.len());
        for (_, date, value) in indexed {
            let value = value.unwrap_or(0.0);
            if dates.last() == Some(&date) {
                // Duplicate date: last occurrence wins.
                if let Some(slot) = values.last_mut() {
                    *slot = value;
                }
            } else {
                dates.push(date);
                values.push(value);
            }
        }

        Self { dates, values }
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The ascending observation dates.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// The observation values, aligned with [`Self::dates`].
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The most recent observation date, if any.
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}
