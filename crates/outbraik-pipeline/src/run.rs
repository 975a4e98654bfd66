//! The run orchestrator.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use outbraik_artifact::{ArtifactStore, StoreConfig, stamp};
use outbraik_dataset::{Dataset, SchemaConfig, load_dataset};
use outbraik_model::{Engine, EngineConfig, ForecastModel, ModelConfig, SeasonalTrendModel};
use outbraik_series::{build_series, enumerate_groups};
use outbraik_types::{
    Bundle, ForecastResult, GroupArtifact, GroupError, GroupKey, OutbraikError,
};
use tracing::{info, warn};

use crate::summary::{RunId, RunSummary};

/// The full configuration surface of a run.
///
/// Everything the pipeline varies on is an explicit field here; nothing is a
/// hard-coded constant or an ambient global.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Input column conventions.
    pub schema: SchemaConfig,
    /// Shipped-model parameters (confidence level, season length).
    pub model: ModelConfig,
    /// Horizon and output window.
    pub engine: EngineConfig,
    /// Artifact location.
    pub store: StoreConfig,
    /// Minimum observations a group needs before fitting. The effective
    /// threshold is never below what the model itself requires.
    pub min_observations: usize,
    /// Maximum group pipelines in flight at once.
    pub concurrency: usize,
    /// Per-group budget for model fitting and prediction.
    pub fit_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            schema: SchemaConfig::default(),
            model: ModelConfig::default(),
            engine: EngineConfig::default(),
            store: StoreConfig::default(),
            min_observations: 3,
            concurrency: 4,
            fit_timeout: Duration::from_secs(30),
        }
    }
}

/// The forecast run orchestrator.
///
/// Each group's pipeline (build series → fit/predict → stamp) is pure with
/// respect to group-local inputs, so groups run concurrently on a bounded
/// pool; the merge into the bundle is the only shared-state step. Group
/// failures become unavailable slots; only schema and persistence problems
/// fail the run.
#[derive(Debug, Clone)]
pub struct Pipeline<M = SeasonalTrendModel> {
    config: PipelineConfig,
    model: M,
}

impl Pipeline {
    /// Creates a pipeline around the shipped seasonal-trend model.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        let model = SeasonalTrendModel::new(config.model.clone());
        Self { config, model }
    }
}

impl<M> Pipeline<M>
where
    M: ForecastModel + Clone + Send + Sync + 'static,
{
    /// Creates a pipeline around a substitute model. The pipeline depends
    /// only on the `{fit, predict}` capability set.
    pub const fn with_model(config: PipelineConfig, model: M) -> Self {
        Self { config, model }
    }

    /// The pipeline configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs the full pipeline over a CSV input and publishes the bundle.
    ///
    /// # Errors
    ///
    /// Returns [`OutbraikError::Data`] before any group processing when the
    /// input is schema-incompatible, and [`OutbraikError::Persistence`] when
    /// the computed bundle cannot be published.
    pub async fn run(&self, input: impl AsRef<Path>) -> Result<RunSummary, OutbraikError> {
        self.run_cancellable(input, &AtomicBool::new(false)).await
    }

    /// Runs the pipeline, checking `cancel` before issuing each group.
    ///
    /// Cancellation stops new group pipelines from being issued; in-flight
    /// groups finish and are merged, cancelled groups leave no slot at all.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::run`].
    pub async fn run_cancellable(
        &self,
        input: impl AsRef<Path>,
        cancel: &AtomicBool,
    ) -> Result<RunSummary, OutbraikError> {
        let run_id = RunId::new();
        let started_at = Utc::now();

        let dataset = load_dataset(input, &self.config.schema).await?;
        let groups = enumerate_groups(&dataset)?;
        info!(
            %run_id,
            rows = dataset.len(),
            groups = groups.len(),
            "starting forecast run"
        );

        let total = groups.len();
        let (bundle, skipped) = self.forecast_groups(&dataset, groups, cancel).await;

        let store = ArtifactStore::new(self.config.store.clone());
        store.save(&bundle)?;

        let summary = RunSummary {
            run_id,
            started_at,
            groups: total,
            forecasted: bundle.forecast_count(),
            unavailable: bundle.unavailable_count(),
            skipped,
            artifact_path: store.path().to_path_buf(),
        };
        info!(
            %run_id,
            forecasted = summary.forecasted,
            unavailable = summary.unavailable,
            skipped = summary.skipped,
            path = %summary.artifact_path.display(),
            "published forecast artifact"
        );
        Ok(summary)
    }

    /// Forecasts every group into a bundle without persisting.
    ///
    /// Returns the bundle and the number of groups skipped by cancellation.
    pub async fn forecast_groups(
        &self,
        dataset: &Dataset,
        groups: Vec<GroupKey>,
        cancel: &AtomicBool,
    ) -> (Bundle, usize) {
        let outcomes: Vec<(GroupKey, Option<GroupArtifact>)> = stream::iter(groups)
            .map(|key| async move {
                if cancel.load(Ordering::Relaxed) {
                    return (key, None);
                }
                let artifact = self.forecast_group(dataset, &key).await;
                (key, Some(artifact))
            })
            .buffer_unordered(self.config.concurrency.max(1))
            .collect()
            .await;

        // The merge is the only step touching shared state; each group owns
        // exactly one slot keyed by its own (region, metric).
        let mut bundle = Bundle::new();
        let mut skipped = 0;
        for (key, outcome) in outcomes {
            match outcome {
                Some(artifact) => bundle.insert(&key, artifact),
                None => skipped += 1,
            }
        }
        (bundle, skipped)
    }

    /// Runs one group's pipeline, converting group-local failures into an
    /// unavailable slot instead of aborting the run.
    async fn forecast_group(&self, dataset: &Dataset, key: &GroupKey) -> GroupArtifact {
        match self.try_forecast_group(dataset, key).await {
            Ok(result) => GroupArtifact::Forecast(result),
            Err(error) => {
                warn!(group = %key, %error, "forecast unavailable for group");
                GroupArtifact::unavailable(&error)
            }
        }
    }

    async fn try_forecast_group(
        &self,
        dataset: &Dataset,
        key: &GroupKey,
    ) -> Result<ForecastResult, GroupError> {
        let min_observations = self
            .config
            .min_observations
            .max(self.model.min_observations());
        let series = build_series(dataset, key, min_observations)?;

        // Fitting is CPU-bound: run it off the reactor, bounded by the
        // per-group budget. A timed-out fit is abandoned, never merged.
        let engine = Engine::new(self.model.clone(), self.config.engine);
        let timeout = self.config.fit_timeout;
        let fit = tokio::task::spawn_blocking(move || engine.forecast_series(&series));
        let points = tokio::time::timeout(timeout, fit)
            .await
            .map_err(|_| GroupError::Timeout {
                seconds: timeout.as_secs(),
            })?
            .map_err(|e| GroupError::FitFailed {
                reason: format!("fit task failed: {e}"),
            })??;

        let mut result = ForecastResult::new(key, points);
        stamp(&mut result).map_err(|e| GroupError::FitFailed {
            reason: format!("integrity stamping failed: {e}"),
        })?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use outbraik_dataset::DatasetRow;
    use outbraik_types::Metric;

    fn monthly_dataset(groups: &[(&str, usize)]) -> Dataset {
        let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        let rows = groups
            .iter()
            .flat_map(|&(region, months)| {
                (0..months).map(move |i| DatasetRow {
                    region: region.to_string(),
                    date: start + chrono::Months::new(i as u32),
                    values: vec![Some(i as f64 * 2.0 + 1.0)],
                })
            })
            .collect();
        Dataset::new(vec![Metric::new("dengue_cases")], "_cases", rows)
    }

    fn pipeline() -> Pipeline {
        Pipeline::new(PipelineConfig::default())
    }

    #[tokio::test]
    async fn degenerate_group_does_not_abort_the_others() {
        let dataset = monthly_dataset(&[("Central", 24), ("North", 2)]);
        let groups = enumerate_groups(&dataset).unwrap();

        let (bundle, skipped) = pipeline()
            .forecast_groups(&dataset, groups, &AtomicBool::new(false))
            .await;

        assert_eq!(skipped, 0);
        assert_eq!(bundle.len(), 2);
        assert!(
            bundle
                .get("Central", "dengue_cases")
                .unwrap()
                .as_forecast()
                .is_some()
        );
        match bundle.get("North", "dengue_cases").unwrap() {
            GroupArtifact::Unavailable { error } => {
                assert!(error.contains("insufficient data"), "got: {error}");
            }
            GroupArtifact::Forecast(_) => panic!("short group must be unavailable"),
        }
    }

    #[tokio::test]
    async fn every_group_gets_exactly_one_slot() {
        let dataset = monthly_dataset(&[("Central", 24), ("North", 24), ("South", 24)]);
        let groups = enumerate_groups(&dataset).unwrap();
        let expected = groups.len();

        let (bundle, _) = pipeline()
            .forecast_groups(&dataset, groups, &AtomicBool::new(false))
            .await;
        assert_eq!(bundle.len(), expected);
        assert_eq!(bundle.forecast_count(), expected);
    }

    #[tokio::test]
    async fn cancellation_skips_unissued_groups() {
        let dataset = monthly_dataset(&[("Central", 24), ("North", 24)]);
        let groups = enumerate_groups(&dataset).unwrap();

        let cancel = AtomicBool::new(true);
        let (bundle, skipped) = pipeline().forecast_groups(&dataset, groups, &cancel).await;

        assert_eq!(skipped, 2);
        assert!(bundle.is_empty(), "cancelled groups leave no slots");
    }

    #[tokio::test]
    async fn forecasts_are_stamped_when_merged() {
        let dataset = monthly_dataset(&[("Central", 24)]);
        let groups = enumerate_groups(&dataset).unwrap();

        let (bundle, _) = pipeline()
            .forecast_groups(&dataset, groups, &AtomicBool::new(false))
            .await;

        let result = bundle
            .get("Central", "dengue_cases")
            .unwrap()
            .as_forecast()
            .unwrap();
        assert!(outbraik_artifact::verify(result).unwrap());
    }
}
