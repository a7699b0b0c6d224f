//! Command implementations for the benchsetup CLI

pub mod completions;
pub mod setup;
pub mod version;
