//! Decide which packages to build.
//!
//! Sources, first match wins:
//! 1. the `BP_GO_TARGETS` override, split on `:`
//! 2. `go.targets` in `buildpack.yml`
//! 3. nothing, so the toolchain builds the package in the app root

use std::path::Path;

use tracing::debug;

use crate::core::{ContributeError, ResolvedTargets};
use crate::util::config::{config_path, BuildpackConfig};

/// Resolves the target list for one application.
#[derive(Debug, Clone)]
pub struct TargetResolver<'a> {
    app_root: &'a Path,
    env_override: Option<String>,
}

impl<'a> TargetResolver<'a> {
    /// A resolver with no environment override.
    pub fn new(app_root: &'a Path) -> Self {
        TargetResolver {
            app_root,
            env_override: None,
        }
    }

    /// Set the colon-separated override. Empty counts as unset.
    pub fn with_override(mut self, targets: Option<String>) -> Self {
        self.env_override = targets.filter(|t| !t.is_empty());
        self
    }

    pub fn resolve(&self) -> Result<ResolvedTargets, ContributeError> {
        if let Some(ref list) = self.env_override {
            debug!("using targets from environment: {}", list);
            return Ok(ResolvedTargets::from_colon_list(list));
        }

        let path = config_path(self.app_root);
        let config = BuildpackConfig::load_if_exists(&path).map_err(|e| {
            ContributeError::Config {
                path: path.clone(),
                message: format!("{:#}", e),
            }
        })?;

        let targets = config
            .map(|c| c.targets().to_vec())
            .unwrap_or_default();
        debug!("using {} target(s) from {}", targets.len(), path.display());

        Ok(ResolvedTargets::from(targets))
    }
}
