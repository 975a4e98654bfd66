//! Explicit schema resolution for the input table.

use outbraik_types::DataError;

/// The recognized column conventions of the input table.
///
/// Every convention the loader relies on is named here so that callers can
/// point the pipeline at tables with different headers without code changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaConfig {
    /// Name of the region column.
    pub region_column: String,
    /// Name of the explicit date column, if the table has one.
    pub date_column: String,
    /// Name of the year column, used when no explicit date column exists.
    pub year_column: String,
    /// Name of the month column, used when no explicit date column exists.
    pub month_column: String,
    /// Suffix identifying metric columns (e.g. `_cases`).
    pub metric_suffix: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            region_column: "region".to_string(),
            date_column: "date".to_string(),
            year_column: "year".to_string(),
            month_column: "month".to_string(),
            metric_suffix: "_cases".to_string(),
        }
    }
}

/// How each row's calendar point is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateAxis {
    /// The table carries an explicit date column at this index.
    Explicit(usize),
    /// The date is synthesized from year+month columns as the first day of
    /// that month.
    YearMonth {
        /// Index of the year column.
        year: usize,
        /// Index of the month column.
        month: usize,
    },
}

/// A validated view of the table header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSchema {
    /// Index of the region column.
    pub region: usize,
    /// How to resolve each row's date.
    pub date_axis: DateAxis,
    /// Metric columns as (name, index), in header order.
    ///
    /// May be empty; group enumeration is the stage that rejects a table
    /// with nothing to forecast.
    pub metrics: Vec<(String, usize)>,
}

/// Validates a header row against the configured conventions.
///
/// An explicit date column takes precedence over year+month synthesis.
///
/// # Errors
///
/// Returns [`DataError::MissingRegionColumn`] if the region column is absent
/// and [`DataError::NoDateAxis`] if neither date convention is satisfiable.
pub fn resolve_schema(headers: &[&str], config: &SchemaConfig) -> Result<ResolvedSchema, DataError> {
    let index_of = |name: &str| headers.iter().position(|h| *h == name);

    let region = index_of(&config.region_column).ok_or_else(|| DataError::MissingRegionColumn {
        column: config.region_column.clone(),
    })?;

    let date_axis = match index_of(&config.date_column) {
        Some(idx) => DateAxis::Explicit(idx),
        None => match (index_of(&config.year_column), index_of(&config.month_column)) {
            (Some(year), Some(month)) => DateAxis::YearMonth { year, month },
            _ => {
                return Err(DataError::NoDateAxis {
                    date_column: config.date_column.clone(),
                    year_column: config.year_column.clone(),
                    month_column: config.month_column.clone(),
                });
            }
        },
    };

    let metrics = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| h.ends_with(&config.metric_suffix))
        .map(|(idx, h)| ((*h).to_string(), idx))
        .collect();

    Ok(ResolvedSchema {
        region,
        date_axis,
        metrics,
    })
}
