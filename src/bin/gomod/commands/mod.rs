//! Command implementations

pub mod build;
pub mod cleanup;
pub mod completions;
