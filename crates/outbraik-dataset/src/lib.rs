//! Dataset ingestion for the outbraik forecast pipeline.
//!
//! This crate turns a tabular CSV source into a typed [`Dataset`] with a
//! resolved date axis:
//!
//! - [`SchemaConfig`] - the recognized column conventions, as explicit
//!   configuration rather than implicit string checks
//! - [`resolve_schema`] - header validation returning a typed schema or a
//!   `DataError`
//! - [`load_dataset`] / [`load_dataset_from_reader`] - async CSV loading

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/outbraik/outbraik/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod dataset;
mod loader;
mod schema;

pub use dataset::{Dataset, DatasetRow};
pub use loader::{load_dataset, load_dataset_from_reader};
pub use schema::{DateAxis, ResolvedSchema, SchemaConfig, resolve_schema};
