//! Filesystem layer manager following the CNB layer layout.
//!
//! ```text
//! <layers>/
//!   go-mod/            layer contents
//!   go-mod.toml        [types] flags + [metadata] identity
//!   app-binary/
//!   app-binary.toml
//!   launch.toml        processes
//! ```

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{Layer, LayerFlags, LayerManager, LayerMetadata, MetadataWriter, PopulateFn};
use crate::core::{ContributeError, LaunchMetadata};
use crate::util::fs::{remove_dir_all_if_exists, write_string};

/// Name of the launch metadata file inside the layers directory.
pub const LAUNCH_TOML: &str = "launch.toml";

/// On-disk record stored next to each layer directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerRecord {
    #[serde(default)]
    pub types: LayerFlags,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<LayerMetadata>,
}

/// [`LayerManager`] and [`MetadataWriter`] over a CNB layers directory.
#[derive(Debug, Clone)]
pub struct FsLayers {
    root: PathBuf,
}

impl FsLayers {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsLayers { root: root.into() }
    }

    /// The layers directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.toml", name))
    }

    /// Read the record of an existing layer.
    ///
    /// A missing or unreadable record means there is nothing to reuse.
    pub fn read_record(&self, name: &str) -> Option<LayerRecord> {
        let path = self.record_path(name);
        let contents = std::fs::read_to_string(&path).ok()?;
        match toml::from_str(&contents) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("ignoring unreadable layer record {}: {}", path.display(), e);
                None
            }
        }
    }

    fn write_record(&self, layer: &Layer, record: &LayerRecord) -> Result<(), ContributeError> {
        let layer_err = |message: String| ContributeError::Layer {
            name: layer.name().to_string(),
            message,
        };

        let contents = toml::to_string(record).map_err(|e| layer_err(e.to_string()))?;
        write_string(&self.record_path(layer.name()), &contents)
            .map_err(|e| layer_err(format!("{:#}", e)))
    }

    fn is_reusable(&self, layer: &Layer, identity: Option<&LayerMetadata>) -> bool {
        let Some(identity) = identity else {
            return false;
        };

        let recorded = self
            .read_record(layer.name())
            .and_then(|record| record.metadata);

        recorded.as_ref() == Some(identity) && layer.root().is_dir()
    }
}

impl LayerManager for FsLayers {
    fn layer(&self, name: &str) -> Layer {
        Layer::new(name, self.root.join(name))
    }

    fn contribute(
        &self,
        layer: &Layer,
        identity: Option<&LayerMetadata>,
        flags: LayerFlags,
        populate: &mut PopulateFn<'_>,
    ) -> Result<(), ContributeError> {
        let record = LayerRecord {
            types: flags,
            metadata: identity.cloned(),
        };

        if self.is_reusable(layer, identity) {
            info!("Reusing cached layer {}", layer.root().display());
            return self.write_record(layer, &record);
        }

        debug!("Contributing layer {}", layer.root().display());

        let layer_err = |message: String| ContributeError::Layer {
            name: layer.name().to_string(),
            message,
        };

        // The populate function creates the directory; a failed populate
        // leaves neither contents nor record behind.
        remove_dir_all_if_exists(layer.root()).map_err(|e| layer_err(format!("{:#}", e)))?;

        let record_path = self.record_path(layer.name());
        match std::fs::remove_file(&record_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(layer_err(format!(
                    "failed to remove stale record {}: {}",
                    record_path.display(),
                    e
                )))
            }
        }

        populate(layer)?;

        self.write_record(layer, &record)
    }
}

impl MetadataWriter for FsLayers {
    fn write_application_metadata(&self, metadata: &LaunchMetadata) -> Result<(), ContributeError> {
        let path = self.root.join(LAUNCH_TOML);
        let metadata_err = |message: String| ContributeError::MetadataWrite {
            path: path.clone(),
            message,
        };

        let contents = toml::to_string(metadata).map_err(|e| metadata_err(e.to_string()))?;
        write_string(&path, &contents).map_err(|e| metadata_err(format!("{:#}", e)))
    }
}
