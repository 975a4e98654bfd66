//! Error types for outbraik.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for outbraik operations.
pub type Result<T> = std::result::Result<T, OutbraikError>;

/// Run-level errors.
///
/// Group-local failures are represented by [`GroupError`] and never surface
/// here; they are recorded per-slot in the bundle instead.
#[derive(Error, Debug)]
pub enum OutbraikError {
    /// The input dataset is malformed or schema-incompatible. Fatal to the
    /// run; there is nothing to forecast.
    #[error(transparent)]
    Data(#[from] DataError),

    /// The artifact could not be written or read. Fatal to the output step
    /// but does not invalidate results already computed in memory.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Errors raised while loading and resolving the input dataset.
#[derive(Error, Debug)]
pub enum DataError {
    /// Neither an explicit date column nor a year+month pair is present.
    #[error(
        "no date axis: expected a '{date_column}' column, or '{year_column}' and '{month_column}' columns"
    )]
    NoDateAxis {
        /// Configured name of the explicit date column.
        date_column: String,
        /// Configured name of the year column.
        year_column: String,
        /// Configured name of the month column.
        month_column: String,
    },

    /// The region column is missing from the header.
    #[error("missing region column '{column}'")]
    MissingRegionColumn {
        /// Configured name of the region column.
        column: String,
    },

    /// No column name matches the metric naming convention.
    #[error("no metric columns: no column name ends with '{suffix}'")]
    NoMetricColumns {
        /// Configured metric column suffix.
        suffix: String,
    },

    /// A cell that must be resolvable (date, year, month) could not be parsed.
    #[error("row {row}: invalid {field} value '{value}'")]
    InvalidValue {
        /// 1-based data row index (excluding the header).
        row: usize,
        /// Name of the offending column.
        field: String,
        /// The raw cell content.
        value: String,
    },

    /// The CSV decoder reported an error.
    #[error("CSV error: {0}")]
    Csv(String),

    /// The dataset file could not be read.
    #[error("failed to read dataset '{path}': {source}")]
    Io {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Group-local errors.
///
/// These never abort a run: the affected (region, metric) slot is recorded
/// as unavailable and all other groups proceed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    /// The group's series is too short to fit the configured model.
    #[error("insufficient data: {actual} observations, need at least {required}")]
    InsufficientData {
        /// Minimum observations required by the model.
        required: usize,
        /// Observations actually present for the group.
        actual: usize,
    },

    /// Model fitting or prediction failed.
    #[error("model fit failed: {reason}")]
    FitFailed {
        /// Human-readable failure reason.
        reason: String,
    },

    /// Model fitting exceeded the per-group time budget.
    #[error("model fit timed out after {seconds}s")]
    Timeout {
        /// The configured timeout, in seconds.
        seconds: u64,
    },
}

/// Errors raised while persisting or reading the forecast artifact.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Failed to create the artifact directory.
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write the temporary artifact file.
    #[error("failed to write artifact '{path}': {source}")]
    Write {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to rename the temporary file into its published location.
    #[error("failed to publish artifact '{path}': {source}")]
    Publish {
        /// The destination path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to read the artifact back.
    #[error("failed to read artifact '{path}': {source}")]
    Read {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse a persisted artifact.
    #[error("failed to parse artifact '{path}': {source}")]
    Parse {
        /// The path that could not be parsed.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// Failed to serialize the bundle.
    #[error("failed to serialize artifact: {0}")]
    Serialize(#[from] serde_json::Error),
}
