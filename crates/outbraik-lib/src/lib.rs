//! Disease-case forecast pipeline: CSV surveillance data in, verified
//! forecast artifacts out.
//!
//! This is a facade crate that re-exports functionality from the outbraik
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use outbraik_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = Pipeline::new(PipelineConfig::default());
//!     let summary = pipeline.run("cases.csv").await?;
//!     println!(
//!         "forecast {} groups into {}",
//!         summary.forecasted,
//!         summary.artifact_path.display()
//!     );
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/outbraik/outbraik/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use outbraik_types::*;

// Re-export dataset loading
pub use outbraik_dataset::{
    Dataset, DatasetRow, DateAxis, ResolvedSchema, SchemaConfig, load_dataset,
    load_dataset_from_reader, resolve_schema,
};

// Re-export series construction
pub use outbraik_series::{Cadence, build_series, enumerate_groups};

// Re-export modelling
pub use outbraik_model::{
    Engine, EngineConfig, FittedModel, ForecastModel, ModelConfig, Prediction, SeasonalTrendModel,
};

// Re-export stamping and persistence
pub use outbraik_artifact::{
    ArtifactStore, StoreConfig, canonical_bytes, content_hash, stamp, verify,
};

// Re-export run orchestration
#[cfg(feature = "pipeline")]
pub use outbraik_pipeline::{Pipeline, PipelineConfig, RunId, RunSummary};

/// Prelude module for convenient imports.
///
/// ```
/// use outbraik_lib::prelude::*;
/// ```
pub mod prelude {
    pub use outbraik_artifact::{ArtifactStore, StoreConfig};
    pub use outbraik_model::{EngineConfig, ForecastModel, ModelConfig, SeasonalTrendModel};
    pub use outbraik_types::{
        Bundle, ForecastPoint, ForecastResult, GroupArtifact, GroupKey, Metric, OutbraikError,
        Region, Result, Series,
    };

    pub use outbraik_dataset::SchemaConfig;

    #[cfg(feature = "pipeline")]
    pub use outbraik_pipeline::{Pipeline, PipelineConfig, RunSummary};
}
