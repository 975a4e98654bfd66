//! Asynchronous CSV loading.

use std::path::Path;

use chrono::NaiveDate;
use csv_async::{AsyncReaderBuilder, StringRecord};
use futures::StreamExt;
use outbraik_types::{DataError, Metric};
use tokio::io::AsyncRead;

use crate::dataset::{Dataset, DatasetRow};
use crate::schema::{DateAxis, SchemaConfig, resolve_schema};

/// Expected format of an explicit date column.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Loads a CSV file into a typed [`Dataset`].
///
/// # Errors
///
/// Returns a [`DataError`] if the file cannot be read, the header does not
/// satisfy the configured schema conventions, or a row's date cannot be
/// resolved.
pub async fn load_dataset(
    path: impl AsRef<Path>,
    config: &SchemaConfig,
) -> Result<Dataset, DataError> {
    let path = path.as_ref();
    let file = tokio::fs::File::open(path).await.map_err(|e| DataError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    load_dataset_from_reader(file, config).await
}

/// Loads a CSV stream into a typed [`Dataset`].
///
/// All rows are retained; missing or non-numeric metric cells become `None`
/// and are resolved later by the series builder's zero-fill policy.
///
/// # Errors
///
/// Same conditions as [`load_dataset`], minus file access.
pub async fn load_dataset_from_reader<R>(
    reader: R,
    config: &SchemaConfig,
) -> Result<Dataset, DataError>
where
    R: AsyncRead + Unpin + Send,
{
    let mut csv = AsyncReaderBuilder::new().create_reader(reader);

    let headers = csv
        .headers()
        .await
        .map_err(|e| DataError::Csv(e.to_string()))?
        .clone();
    let header_names: Vec<&str> = headers.iter().map(str::trim).collect();
    let schema = resolve_schema(&header_names, config)?;

    let metrics: Vec<Metric> = schema
        .metrics
        .iter()
        .map(|(name, _)| Metric::new(name.as_str()))
        .collect();

    let mut rows = Vec::new();
    let mut records = csv.records();
    let mut row = 0usize;
    while let Some(record) = records.next().await {
        row += 1;
        let record = record.map_err(|e| DataError::Csv(e.to_string()))?;

        let region = record
            .get(schema.region)
            .unwrap_or_default()
            .trim()
            .to_string();
        let date = resolve_date(&record, schema.date_axis, row, config)?;
        let values = schema
            .metrics
            .iter()
            .map(|&(_, idx)| parse_value(record.get(idx)))
            .collect();

        rows.push(DatasetRow {
            region,
            date,
            values,
        });
    }

    Ok(Dataset::new(metrics, config.metric_suffix.as_str(), rows))
}

/// Resolves one row's calendar point.
///
/// Year+month synthesis maps to the first day of that month, so monthly
/// tables get a uniform within-month anchor.
fn resolve_date(
    record: &StringRecord,
    axis: DateAxis,
    row: usize,
    config: &SchemaConfig,
) -> Result<NaiveDate, DataError> {
    match axis {
        DateAxis::Explicit(idx) => {
            let raw = record.get(idx).unwrap_or_default().trim();
            NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| DataError::InvalidValue {
                row,
                field: config.date_column.clone(),
                value: raw.to_string(),
            })
        }
        DateAxis::YearMonth { year, month } => {
            let year_raw = record.get(year).unwrap_or_default().trim();
            let month_raw = record.get(month).unwrap_or_default().trim();

            let y: i32 = year_raw.parse().map_err(|_| DataError::InvalidValue {
                row,
                field: config.year_column.clone(),
                value: year_raw.to_string(),
            })?;
            let m: u32 = month_raw.parse().map_err(|_| DataError::InvalidValue {
                row,
                field: config.month_column.clone(),
                value: month_raw.to_string(),
            })?;

            NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(|| DataError::InvalidValue {
                row,
                field: config.month_column.clone(),
                value: month_raw.to_string(),
            })
        }
    }
}

/// Parses a metric cell. Empty, non-numeric, and non-finite cells are all
/// treated as missing.
fn parse_value(cell: Option<&str>) -> Option<f64> {
    let raw = cell?.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn load(csv: &str) -> Result<Dataset, DataError> {
        load_dataset_from_reader(csv.as_bytes(), &SchemaConfig::default()).await
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[tokio::test]
    async fn year_month_rows_resolve_to_first_of_month() {
        let dataset = load(
            "region,year,month,dengue_cases\n\
             Central,2024,1,10\n\
             Central,2024,12,20\n",
        )
        .await
        .unwrap();

        assert_eq!(dataset.rows()[0].date, d(2024, 1, 1));
        assert_eq!(dataset.rows()[1].date, d(2024, 12, 1));
    }

    #[tokio::test]
    async fn explicit_dates_parse_as_is() {
        let dataset = load(
            "region,date,dengue_cases\n\
             Central,2024-03-15,4\n",
        )
        .await
        .unwrap();

        assert_eq!(dataset.rows()[0].date, d(2024, 3, 15));
    }

    #[tokio::test]
    async fn missing_and_non_numeric_cells_load_as_none() {
        let dataset = load(
            "region,date,dengue_cases\n\
             Central,2024-01-01,\n\
             Central,2024-02-01,n/a\n\
             Central,2024-03-01,7\n",
        )
        .await
        .unwrap();

        let values: Vec<_> = dataset.rows().iter().map(|r| r.values[0]).collect();
        assert_eq!(values, vec![None, None, Some(7.0)]);
        assert_eq!(dataset.len(), 3, "rows with missing values are retained");
    }

    #[tokio::test]
    async fn invalid_month_is_a_data_error() {
        let err = load(
            "region,year,month,dengue_cases\n\
             Central,2024,13,10\n",
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            DataError::InvalidValue { row: 1, ref field, .. } if field == "month"
        ));
    }

    #[tokio::test]
    async fn header_without_date_axis_fails_before_rows() {
        let err = load("region,dengue_cases\nCentral,1\n").await.unwrap_err();
        assert!(matches!(err, DataError::NoDateAxis { .. }));
    }

    #[tokio::test]
    async fn zero_metric_columns_still_load() {
        // Nothing-to-forecast is the group enumerator's call, not the loader's.
        let dataset = load("region,date,temperature\nCentral,2024-01-01,31.5\n")
            .await
            .unwrap();
        assert!(dataset.metrics().is_empty());
        assert_eq!(dataset.len(), 1);
    }
}
