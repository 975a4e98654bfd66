//! Group enumeration and per-group series construction.
//!
//! - [`enumerate_groups`] - the (region, metric) Cartesian product
//! - [`build_series`] - one group's ordered, gap-filled series
//! - [`Cadence`] - spacing of a series, used to generate future dates

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/outbraik/outbraik/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod builder;
mod cadence;
mod groups;

pub use builder::build_series;
pub use cadence::Cadence;
pub use groups::enumerate_groups;
