//! List command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use outbraik_lib::prelude::*;

/// Print every group in a published artifact with its status.
pub(crate) fn list(artifact: Option<&Path>) -> Result<()> {
    let config = artifact.map_or_else(StoreConfig::default, StoreConfig::new);
    let store = ArtifactStore::new(config);
    let bundle = store
        .load()
        .with_context(|| format!("Cannot load artifact from {}", store.path().display()))?;

    for (region, metric, slot) in bundle.iter() {
        match slot {
            GroupArtifact::Forecast(result) => {
                println!(
                    "{region}/{metric}  {} points  generated {}",
                    result.forecast.len(),
                    result.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
                );
            }
            GroupArtifact::Unavailable { error } => {
                println!("{region}/{metric}  unavailable: {error}");
            }
        }
    }
    println!(
        "{} groups ({} forecast, {} unavailable)",
        bundle.len(),
        bundle.forecast_count(),
        bundle.unavailable_count()
    );
    Ok(())
}
