//! CLI command implementations.

pub(crate) mod generate;
pub(crate) mod list;
pub(crate) mod serve;
pub(crate) mod verify;
