//! The typed in-memory dataset.

use chrono::NaiveDate;
use outbraik_types::{Metric, Region};

/// One input row after date resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRow {
    /// The row's region value.
    pub region: String,
    /// The resolved calendar point.
    pub date: NaiveDate,
    /// One entry per metric column, aligned with [`Dataset::metrics`].
    /// `None` marks a missing or non-numeric cell.
    pub values: Vec<Option<f64>>,
}

/// A normalized tabular dataset with a resolved date axis.
///
/// No filtering happens at load time: all rows are retained, including those
/// with missing metric values.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    metrics: Vec<Metric>,
    metric_suffix: String,
    rows: Vec<DatasetRow>,
}

impl Dataset {
    /// Assembles a dataset from resolved metric columns and rows.
    #[must_use]
    pub fn new(metrics: Vec<Metric>, metric_suffix: impl Into<String>, rows: Vec<DatasetRow>) -> Self {
        Self {
            metrics,
            metric_suffix: metric_suffix.into(),
            rows,
        }
    }

    /// The suffix that identified the metric columns.
    #[must_use]
    pub fn metric_suffix(&self) -> &str {
        &self.metric_suffix
    }

    /// The metric columns, in header order.
    #[must_use]
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// All rows, in input order.
    #[must_use]
    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    /// Distinct regions, sorted for deterministic iteration.
    #[must_use]
    pub fn regions(&self) -> Vec<Region> {
        let mut regions: Vec<&str> = self.rows.iter().map(|r| r.region.as_str()).collect();
        regions.sort_unstable();
        regions.dedup();
        regions.into_iter().map(Region::new).collect()
    }

    /// Position of a metric in each row's value vector.
    #[must_use]
    pub fn metric_index(&self, metric: &Metric) -> Option<usize> {
        self.metrics.iter().position(|m| m == metric)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the dataset has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn row(region: &str, date: NaiveDate, value: Option<f64>) -> DatasetRow {
        DatasetRow {
            region: region.to_string(),
            date,
            values: vec![value],
        }
    }

    #[test]
    fn regions_are_distinct_and_sorted() {
        let dataset = Dataset::new(
            vec![Metric::new("dengue_cases")],
            "_cases",
            vec![
                row("North", d(2024, 1, 1), Some(1.0)),
                row("Central", d(2024, 1, 1), Some(2.0)),
                row("North", d(2024, 2, 1), Some(3.0)),
            ],
        );

        assert_eq!(
            dataset.regions(),
            vec![Region::new("Central"), Region::new("North")]
        );
    }

    #[test]
    fn metric_index_follows_header_order() {
        let dataset = Dataset::new(
            vec![Metric::new("dengue_cases"), Metric::new("malaria_cases")],
            "_cases",
            vec![],
        );
        assert_eq!(dataset.metric_index(&Metric::new("malaria_cases")), Some(1));
        assert_eq!(dataset.metric_index(&Metric::new("flu_cases")), None);
    }
}
