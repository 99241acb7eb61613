//! High-level operations.
//!
//! This module contains the implementation of the `gomod` commands.

pub mod cleanup;
pub mod contribute;

pub use cleanup::cleanup;
pub use contribute::{Contribution, Contributor};
