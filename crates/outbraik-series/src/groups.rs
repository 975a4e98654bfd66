//! Group discovery.

use outbraik_dataset::Dataset;
use outbraik_types::{DataError, GroupKey};

/// Enumerates the full (region, metric) group set of a dataset.
///
/// The group set is the Cartesian product of distinct regions and metric
/// columns, emitted region-then-metric sorted so run output is
/// deterministic. No group is silently dropped.
///
/// # Errors
///
/// Returns [`DataError::NoMetricColumns`] when the dataset has no metric
/// columns; with nothing to forecast the run cannot proceed.
pub fn enumerate_groups(dataset: &Dataset) -> Result<Vec<GroupKey>, DataError> {
    if dataset.metrics().is_empty() {
        return Err(DataError::NoMetricColumns {
            suffix: dataset.metric_suffix().to_string(),
        });
    }

    let mut metrics: Vec<_> = dataset.metrics().to_vec();
    metrics.sort();

    let groups = dataset
        .regions()
        .into_iter()
        .flat_map(|region| {
            metrics
                .iter()
                .map(move |metric| GroupKey::new(region.clone(), metric.clone()))
        })
        .collect();

    Ok(groups)
}
