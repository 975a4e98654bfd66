//! Generate command implementation.
//!
//! Runs the full pipeline over an input CSV and publishes the forecast
//! artifact.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use outbraik_lib::prelude::*;

/// Flags collected from the command line for a pipeline run.
pub(crate) struct GenerateOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub horizon: usize,
    pub window: usize,
    pub min_observations: usize,
    pub metric_suffix: String,
    pub region_column: String,
    pub date_column: String,
    pub year_column: String,
    pub month_column: String,
    pub season_length: usize,
    pub confidence: f64,
    pub concurrency: usize,
    pub fit_timeout: Duration,
    pub quiet: bool,
}

/// Run the forecast pipeline and publish the artifact.
pub(crate) async fn generate(options: GenerateOptions) -> Result<()> {
    let store = match options.output {
        Some(path) => StoreConfig::new(path),
        None => StoreConfig::default(),
    };

    let config = PipelineConfig {
        schema: SchemaConfig {
            region_column: options.region_column,
            date_column: options.date_column,
            year_column: options.year_column,
            month_column: options.month_column,
            metric_suffix: options.metric_suffix,
        },
        model: ModelConfig {
            confidence_level: options.confidence,
            season_length: options.season_length,
        },
        engine: EngineConfig {
            horizon: options.horizon,
            window: options.window,
        },
        store,
        min_observations: options.min_observations,
        concurrency: options.concurrency,
        fit_timeout: options.fit_timeout,
    };

    let progress = if options.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("Invalid progress template"),
        );
        pb.set_message(format!("forecasting {}", options.input.display()));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };

    let pipeline = Pipeline::new(config);
    let summary = pipeline
        .run(&options.input)
        .await
        .with_context(|| format!("Forecast run failed for {}", options.input.display()))?;

    progress.finish_and_clear();

    println!(
        "Forecast {} of {} groups ({} unavailable)",
        summary.forecasted, summary.groups, summary.unavailable
    );
    println!("Artifact: {}", summary.artifact_path.display());
    Ok(())
}
