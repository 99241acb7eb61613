//! Compile targets into the `go-mod` layer.
//!
//! The layer serves as `GOPATH`, so `go install` leaves downloaded modules
//! under `pkg/mod` and the compiled binaries under `bin/`.

use std::path::Path;

use tracing::info;

use crate::builder::toolchain::GoToolchain;
use crate::core::{ContributeError, ResolvedTargets};
use crate::layers::Layer;
use crate::util::fs::ensure_dir;
use crate::util::process::Runner;

/// Populates the module cache layer by running `go install`.
pub struct ModuleCacheStage<'a> {
    runner: &'a dyn Runner,
    toolchain: &'a GoToolchain,
    app_root: &'a Path,
    targets: &'a ResolvedTargets,
}

impl<'a> ModuleCacheStage<'a> {
    pub fn new(
        runner: &'a dyn Runner,
        toolchain: &'a GoToolchain,
        app_root: &'a Path,
        targets: &'a ResolvedTargets,
    ) -> Self {
        ModuleCacheStage {
            runner,
            toolchain,
            app_root,
            targets,
        }
    }

    /// Whether the application vendors its dependencies.
    pub fn is_vendored(&self) -> bool {
        self.app_root.join("vendor").exists()
    }

    /// Run `go install` with `GOPATH` set to the layer root.
    pub fn populate(&self, layer: &Layer) -> Result<(), ContributeError> {
        let cmd = self.toolchain.install(
            self.app_root,
            layer.root(),
            self.is_vendored(),
            self.targets,
        );
        let build_failure = |message: String| ContributeError::BuildFailure {
            command: cmd.display_command(),
            message,
        };

        ensure_dir(layer.root()).map_err(|e| build_failure(format!("{:#}", e)))?;

        info!("Running `{}`", cmd.display_command());
        self.runner
            .run(&cmd, false)
            .map_err(|e| build_failure(format!("{:#}", e)))
    }
}
