//! Content hashing and artifact persistence.
//!
//! - [`stamp`] / [`verify`] - tamper-evident SHA-256 over a canonical
//!   serialization of each forecast result
//! - [`ArtifactStore`] - atomic persistence of the full bundle as one JSON
//!   snapshot

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/outbraik/outbraik/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod stamp;
mod store;

pub use stamp::{canonical_bytes, content_hash, stamp, verify};
pub use store::{ArtifactStore, StoreConfig};
