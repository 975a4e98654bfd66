//! Core types for the outbraik disease forecast pipeline.
//!
//! This crate provides the fundamental data structures used throughout
//! outbraik:
//!
//! - [`Region`], [`Metric`], [`GroupKey`] - the (region, metric) unit of forecasting
//! - [`Series`] - an ordered, gap-filled univariate time series
//! - [`ForecastPoint`], [`ForecastResult`] - per-group forecast output
//! - [`Bundle`] - the full artifact across all groups for one run
//! - [`OutbraikError`] and friends - the shared error taxonomy

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/outbraik/outbraik/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bundle;
mod error;
mod forecast;
mod group;
mod series;

pub use bundle::{Bundle, GroupArtifact};
pub use error::{DataError, GroupError, OutbraikError, PersistenceError, Result};
pub use forecast::{ForecastPoint, ForecastResult};
pub use group::{GroupKey, Metric, Region};
pub use series::Series;
