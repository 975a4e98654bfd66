//! Run orchestration for the outbraik forecast pipeline.
//!
//! - [`Pipeline`] - load → enumerate → parallel per-group forecast → merge →
//!   persist
//! - [`PipelineConfig`] - the full configuration surface of a run
//! - [`RunSummary`] - what a completed run produced

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/outbraik/outbraik/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod run;
mod summary;

pub use run::{Pipeline, PipelineConfig};
pub use summary::{RunId, RunSummary};
