//! The Go build contribution.
//!
//! Steps, each gated on the previous one:
//!
//! 1. resolve targets
//! 2. `go-mod` layer (cache): `go install` with `GOPATH` in the layer
//! 3. derive the app name
//! 4. `app-binary` layer (launch): move the binary out of `GOPATH/bin`
//! 5. write the `web` start command
//!
//! The first failing step ends the run and its error is returned as-is.
//! Partially populated layers are left for the layer manager to deal with.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::builder::{write_start_command, BinaryStage, GoToolchain, ModuleCacheStage};
use crate::core::{AppName, ContributeError, ResolvedTargets};
use crate::layers::{
    Layer, LayerFlags, LayerManager, MetadataWriter, APP_BINARY_LAYER, GO_MOD_LAYER,
};
use crate::ops::cleanup::cleanup;
use crate::resolver::{derive_app_name, TargetResolver};
use crate::util::context::BuildContext;
use crate::util::process::Runner;

/// What a successful contribution produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    /// Targets passed to `go install`
    pub targets: ResolvedTargets,

    /// Binary and process name
    pub app_name: AppName,

    /// Registered `web` command
    pub launch_path: PathBuf,
}

/// Contributes the Go layers and start command for one application.
pub struct Contributor<'a> {
    app_root: PathBuf,
    runner: &'a dyn Runner,
    layers: &'a dyn LayerManager,
    metadata: &'a dyn MetadataWriter,
    toolchain: GoToolchain,
    targets_override: Option<String>,
}

impl<'a> Contributor<'a> {
    pub fn new(
        app_root: impl Into<PathBuf>,
        runner: &'a dyn Runner,
        layers: &'a dyn LayerManager,
        metadata: &'a dyn MetadataWriter,
    ) -> Self {
        Contributor {
            app_root: app_root.into(),
            runner,
            layers,
            metadata,
            toolchain: GoToolchain::default(),
            targets_override: None,
        }
    }

    /// Create a contributor for the app root of a build context.
    pub fn from_context(
        ctx: &BuildContext,
        runner: &'a dyn Runner,
        layers: &'a dyn LayerManager,
        metadata: &'a dyn MetadataWriter,
    ) -> Self {
        Self::new(ctx.app_root(), runner, layers, metadata)
    }

    /// Use a specific `go` toolchain.
    pub fn with_toolchain(mut self, toolchain: GoToolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    /// Colon-separated target override (`BP_GO_TARGETS`).
    pub fn with_targets_override(mut self, targets: Option<String>) -> Self {
        self.targets_override = targets;
        self
    }

    pub fn app_root(&self) -> &Path {
        &self.app_root
    }

    /// Run the full contribution.
    pub fn contribute(&self) -> Result<Contribution, ContributeError> {
        let targets = TargetResolver::new(&self.app_root)
            .with_override(self.targets_override.clone())
            .resolve()?;
        info!("Building targets: {}", targets);

        let go_mod = self.layers.layer(GO_MOD_LAYER);
        let app_binary = self.layers.layer(APP_BINARY_LAYER);

        // Neither layer carries an identity, so the layer manager rebuilds
        // both on every run.
        let module_cache =
            ModuleCacheStage::new(self.runner, &self.toolchain, &self.app_root, &targets);
        self.layers.contribute(
            &go_mod,
            None,
            LayerFlags::cache(),
            &mut |layer: &Layer| module_cache.populate(layer),
        )?;

        let app_name = derive_app_name(&targets, &self.app_root, self.runner, &self.toolchain)?;
        info!("App name: {}", app_name);

        let binary = BinaryStage::new(go_mod.root(), &app_name);
        self.layers.contribute(
            &app_binary,
            None,
            LayerFlags::launch(),
            &mut |layer: &Layer| binary.populate(layer),
        )?;

        let launch_path = write_start_command(self.metadata, app_binary.root(), &app_name)?;

        Ok(Contribution {
            targets,
            app_name,
            launch_path,
        })
    }

    /// Remove everything under the application root.
    ///
    /// Not part of [`Contributor::contribute`]; callers invoke it once the
    /// source tree is no longer needed.
    pub fn cleanup(&self) -> Result<(), ContributeError> {
        cleanup(&self.app_root)
    }
}
