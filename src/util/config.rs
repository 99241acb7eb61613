//! Configuration file support.
//!
//! The application can carry a `buildpack.yml` at its root. Several
//! buildpacks share this file, so only the `go` section is read and every
//! other key is ignored:
//!
//! ```yaml
//! go:
//!   targets:
//!     - ./cmd/server
//!     - ./cmd/worker
//! ```
//!
//! The `BP_GO_TARGETS` environment variable takes precedence over the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::fs::read_to_string;

/// File name of the per-application config.
pub const CONFIG_FILE_NAME: &str = "buildpack.yml";

/// Environment variable holding a colon-separated list of targets.
pub const TARGETS_ENV: &str = "BP_GO_TARGETS";

/// Contents of `buildpack.yml` relevant to this buildpack.
///
/// Sections are optional so that a bare `go:` key parses as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildpackConfig {
    /// Go settings
    #[serde(default)]
    pub go: Option<GoConfig>,
}

/// The `go` section of `buildpack.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoConfig {
    /// Packages to pass to `go install`
    #[serde(default)]
    pub targets: Option<Vec<String>>,
}

impl BuildpackConfig {
    /// Configured targets, empty when the section or key is absent.
    pub fn targets(&self) -> &[String] {
        self.go
            .as_ref()
            .and_then(|go| go.targets.as_deref())
            .unwrap_or(&[])
    }

    /// Parse config from YAML text.
    ///
    /// Only the first document of a multi-document stream is read. An empty
    /// document is the same as no config.
    pub fn parse(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let Some(document) = serde_yaml::Deserializer::from_str(contents).next() else {
            return Ok(Self::default());
        };
        let config = Option::<BuildpackConfig>::deserialize(document)
            .context("failed to parse YAML")?;
        Ok(config.unwrap_or_default())
    }

    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load config if the file exists.
    ///
    /// A missing file yields `None`; a file that exists but cannot be read
    /// or parsed is an error.
    pub fn load_if_exists(path: &Path) -> Result<Option<Self>> {
        match std::fs::metadata(path) {
            Ok(_) => Self::load(path).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("failed to stat config: {}", path.display())),
        }
    }
}

/// Path of `buildpack.yml` for an application root.
pub fn config_path(app_root: &Path) -> PathBuf {
    app_root.join(CONFIG_FILE_NAME)
}
