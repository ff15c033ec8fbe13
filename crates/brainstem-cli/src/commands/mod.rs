//! Subcommand implementations.

pub mod get;
pub mod results;
pub mod summary;
