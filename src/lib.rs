//! gomod - Go modules build step for Cloud Native Buildpacks
//!
//! This crate compiles a Go application with `go install`, caches `GOPATH`
//! in a layer, stages the resulting binary in a launch layer and registers
//! it as the `web` process.

pub mod builder;
pub mod core;
pub mod layers;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test utilities and fakes for unit tests.
///
/// Provides a recording runner, an in-memory layer manager and Go project
/// fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{AppName, BuildTarget, ContributeError, LaunchMetadata, ResolvedTargets};
pub use layers::{FsLayers, LayerManager, MetadataWriter};
pub use ops::{Contribution, Contributor};
pub use util::context::BuildContext;
