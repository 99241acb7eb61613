//! Errors raised while contributing the Go layers.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error from one step of the build contribution.
///
/// Each step returns its own variant and callers pass it up with `?`,
/// so the first failure is what the caller sees.
#[derive(Debug, Error)]
pub enum ContributeError {
    /// `buildpack.yml` exists but could not be read or parsed.
    #[error("invalid config `{}`: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// No app name could be derived.
    ///
    /// Either `go list -m` failed or printed no module path, or the first
    /// target has an empty final segment. `command` names the source the
    /// name was taken from: the query command line, or `target <path>` when
    /// no query ran.
    #[error("failed to determine app name from `{command}`: {message}")]
    ToolchainQuery { command: String, message: String },

    /// `go install` could not start or exited non-zero.
    #[error("build failed: `{command}`: {message}")]
    BuildFailure { command: String, message: String },

    /// The compiled binary is missing or could not be moved.
    #[error("failed to stage `{}` to `{}`", from.display(), to.display())]
    Staging {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `launch.toml` could not be written.
    #[error("failed to write launch metadata `{}`: {message}", path.display())]
    MetadataWrite { path: PathBuf, message: String },

    /// The layer manager could not prepare or record a layer.
    #[error("layer `{name}`: {message}")]
    Layer { name: String, message: String },

    /// An entry under the application root could not be removed.
    #[error("failed to remove `{}`", path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ContributeError {
    /// Short category name, used for JSON error events.
    pub fn kind(&self) -> &'static str {
        match self {
            ContributeError::Config { .. } => "config",
            ContributeError::ToolchainQuery { .. } => "toolchain-query",
            ContributeError::BuildFailure { .. } => "build-failure",
            ContributeError::Staging { .. } => "staging",
            ContributeError::MetadataWrite { .. } => "metadata-write",
            ContributeError::Layer { .. } => "layer",
            ContributeError::Cleanup { .. } => "cleanup",
        }
    }
}
