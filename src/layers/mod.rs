//! Layers: managed directories whose reuse is decided by an identity token.
//!
//! The contributor never touches layer directories on its own. It asks a
//! [`LayerManager`] to contribute a layer and hands it a populate function;
//! the manager decides whether the previous contents can be reused or the
//! layer has to be rebuilt. Launch metadata goes through a
//! [`MetadataWriter`].

mod fs;

pub use fs::FsLayers;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{ContributeError, LaunchMetadata};

/// Layer holding `GOPATH` (module cache, build cache, `bin/`).
pub const GO_MOD_LAYER: &str = "go-mod";

/// Layer holding the app binary that ships in the image.
pub const APP_BINARY_LAYER: &str = "app-binary";

/// A named, path-addressable layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    name: String,
    root: PathBuf,
}

impl Layer {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Layer {
            name: name.into(),
            root: root.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory holding the layer's contents.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// How the lifecycle treats a layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerFlags {
    /// Visible to later buildpacks during the build
    pub build: bool,

    /// Restored from cache on the next build
    pub cache: bool,

    /// Exported into the runnable image
    pub launch: bool,
}

impl LayerFlags {
    /// Cached between builds, not part of the image.
    pub fn cache() -> Self {
        LayerFlags {
            cache: true,
            ..Default::default()
        }
    }

    /// Part of the image.
    pub fn launch() -> Self {
        LayerFlags {
            launch: true,
            ..Default::default()
        }
    }
}

/// Identity of a layer's contents.
///
/// When the identity of a contribution equals the one recorded for the
/// existing layer, the layer is reused as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerMetadata {
    pub name: String,
    pub version: String,
}

impl LayerMetadata {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        LayerMetadata {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Callback that fills a layer directory.
pub type PopulateFn<'a> = dyn FnMut(&Layer) -> Result<(), ContributeError> + 'a;

/// Owns layer directories and their reuse-vs-rebuild decision.
pub trait LayerManager {
    /// Handle for the named layer.
    fn layer(&self, name: &str) -> Layer;

    /// Contribute a layer.
    ///
    /// `populate` runs unless `identity` is present and matches the record
    /// of the existing layer. Errors from `populate` are returned as-is.
    fn contribute(
        &self,
        layer: &Layer,
        identity: Option<&LayerMetadata>,
        flags: LayerFlags,
        populate: &mut PopulateFn<'_>,
    ) -> Result<(), ContributeError>;
}

/// Persists the processes the launcher can start.
pub trait MetadataWriter {
    fn write_application_metadata(&self, metadata: &LaunchMetadata) -> Result<(), ContributeError>;
}
