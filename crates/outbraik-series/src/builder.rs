//! Per-group series extraction.

use outbraik_dataset::Dataset;
use outbraik_types::{GroupError, GroupKey, Series};

/// Builds the ordered, gap-filled series for one group.
///
/// Filters the dataset to the group's region, selects (date, metric value)
/// pairs, sorts ascending, and replaces missing values with zero. The
/// minimum-observation check happens here, explicitly, so a short series
/// yields a clear error instead of an opaque model failure.
///
/// # Errors
///
/// Returns [`GroupError::InsufficientData`] when the group has fewer than
/// `min_observations` points (a metric column unknown to the dataset counts
/// as zero observations).
pub fn build_series(
    dataset: &Dataset,
    key: &GroupKey,
    min_observations: usize,
) -> Result<Series, GroupError> {
    let observations = dataset.metric_index(&key.metric).map_or_else(Vec::new, |idx| {
        dataset
            .rows()
            .iter()
            .filter(|row| row.region == key.region.as_str())
            .map(|row| (row.date, row.values.get(idx).copied().flatten()))
            .collect()
    });

    let series = Series::from_observations(observations);
    if series.len() < min_observations {
        return Err(GroupError::InsufficientData {
            required: min_observations,
            actual: series.len(),
        });
    }
    Ok(series)
}
