//! Verify command implementation.
//!
//! Re-verifies the content hash of every forecast in a published artifact.

use std::path::Path;

use anyhow::{Context, Result, bail};
use outbraik_lib::prelude::*;

/// Recompute and compare the hash of every forecast slot.
pub(crate) fn verify(artifact: Option<&Path>) -> Result<()> {
    let config = artifact.map_or_else(StoreConfig::default, StoreConfig::new);
    let store = ArtifactStore::new(config);
    let bundle = store
        .load()
        .with_context(|| format!("Cannot load artifact from {}", store.path().display()))?;

    let mut verified = 0usize;
    let mut failed = Vec::new();
    for (region, metric, slot) in bundle.iter() {
        let Some(result) = slot.as_forecast() else {
            continue;
        };
        if outbraik_lib::verify(result).context("Cannot canonicalize forecast payload")? {
            verified += 1;
        } else {
            failed.push(format!("{region}/{metric}"));
        }
    }

    if !failed.is_empty() {
        for group in &failed {
            eprintln!("hash mismatch: {group}");
        }
        bail!(
            "{} of {} forecasts failed verification",
            failed.len(),
            verified + failed.len()
        );
    }

    println!(
        "Verified {verified} forecasts ({} unavailable slots skipped)",
        bundle.unavailable_count()
    );
    Ok(())
}
