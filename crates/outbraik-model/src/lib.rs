//! Forecast models and horizon projection.
//!
//! The engine is polymorphic over the `{fit, predict}` capability set:
//!
//! - [`ForecastModel`] / [`FittedModel`] - the model contract
//! - [`SeasonalTrendModel`] - the shipped trend + seasonal least-squares model
//! - [`Engine`] - horizon projection and the trailing output window

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/outbraik/outbraik/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod model;
mod seasonal_trend;

pub use engine::{Engine, EngineConfig};
pub use model::{FittedModel, ForecastModel, Prediction};
pub use seasonal_trend::{FittedSeasonalTrend, ModelConfig, SeasonalTrendModel};
