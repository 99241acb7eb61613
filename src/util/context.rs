//! Build context: the directories the CNB lifecycle hands to `bin/build`.
//!
//! The lifecycle runs the build step with the application source as the
//! working directory and passes:
//!
//! 1. the layers directory, where each layer is a subdirectory plus a
//!    `<name>.toml` record, and `launch.toml` lists the processes;
//! 2. the platform directory (`<platform>/env/*` holds user env vars);
//! 3. the build plan path.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Paths for one build run.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Application source root
    app_root: PathBuf,

    /// Directory holding all layers for this buildpack
    layers_dir: PathBuf,

    /// Platform directory, if the lifecycle passed one
    platform_dir: Option<PathBuf>,

    /// Build plan path, if the lifecycle passed one
    plan_path: Option<PathBuf>,
}

impl BuildContext {
    /// Create a context for an explicit application root.
    pub fn new(app_root: impl Into<PathBuf>, layers_dir: impl Into<PathBuf>) -> Self {
        BuildContext {
            app_root: app_root.into(),
            layers_dir: layers_dir.into(),
            platform_dir: None,
            plan_path: None,
        }
    }

    /// Create a context rooted at the current working directory.
    pub fn from_cwd(layers_dir: impl Into<PathBuf>) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::new(cwd, layers_dir))
    }

    /// Set the platform directory.
    pub fn with_platform_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.platform_dir = dir;
        self
    }

    /// Set the build plan path.
    pub fn with_plan_path(mut self, path: Option<PathBuf>) -> Self {
        self.plan_path = path;
        self
    }

    /// Get the application root.
    pub fn app_root(&self) -> &Path {
        &self.app_root
    }

    /// Get the layers directory.
    pub fn layers_dir(&self) -> &Path {
        &self.layers_dir
    }

    pub fn platform_dir(&self) -> Option<&Path> {
        self.platform_dir.as_deref()
    }

    pub fn plan_path(&self) -> Option<&Path> {
        self.plan_path.as_deref()
    }

    /// Value of a platform env var (`<platform>/env/<name>`), if set.
    pub fn platform_env(&self, name: &str) -> Result<Option<String>> {
        let Some(platform) = self.platform_dir() else {
            return Ok(None);
        };

        let path = platform.join("env").join(name);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("failed to read platform env: {}", path.display())),
        }
    }
}
