//! Run identity and bookkeeping.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one pipeline run, used to correlate log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl RunId {
    /// Creates a fresh run identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// The run's identifier.
    pub run_id: RunId,
    /// When the run started (UTC).
    pub started_at: DateTime<Utc>,
    /// Total groups enumerated from the dataset.
    pub groups: usize,
    /// Groups with a completed, stamped forecast.
    pub forecasted: usize,
    /// Groups recorded as unavailable with a reason.
    pub unavailable: usize,
    /// Groups never issued because the run was cancelled.
    pub skipped: usize,
    /// Where the bundle snapshot was published.
    pub artifact_path: PathBuf,
}
