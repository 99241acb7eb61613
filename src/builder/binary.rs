//! Move the compiled binary into the launch layer.

use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::{AppName, ContributeError};
use crate::layers::Layer;

/// Populates the launch layer with `<GOPATH>/bin/<app>`.
pub struct BinaryStage<'a> {
    cache_root: &'a Path,
    app_name: &'a AppName,
}

impl<'a> BinaryStage<'a> {
    pub fn new(cache_root: &'a Path, app_name: &'a AppName) -> Self {
        BinaryStage {
            cache_root,
            app_name,
        }
    }

    /// Where `go install` left the binary.
    pub fn source_path(&self) -> PathBuf {
        self.cache_root.join("bin").join(self.app_name)
    }

    /// Where the binary lands inside the given launch layer root.
    pub fn dest_path(&self, launch_root: &Path) -> PathBuf {
        launch_root.join(self.app_name)
    }

    /// Move the binary into the layer, creating the layer root.
    ///
    /// Nothing is created when the binary is missing.
    pub fn populate(&self, layer: &Layer) -> Result<(), ContributeError> {
        info!("Contributing app binary layer");

        let from = self.source_path();
        let to = self.dest_path(layer.root());
        let staging_err = |source: io::Error| ContributeError::Staging {
            from: from.clone(),
            to: to.clone(),
            source,
        };

        if !from.is_file() {
            return Err(staging_err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no binary named `{}` was built", self.app_name),
            )));
        }

        std::fs::create_dir_all(layer.root()).map_err(staging_err)?;
        std::fs::rename(&from, &to).map_err(staging_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_moves_binary_and_creates_launch_root() {
        let tmp = TempDir::new().unwrap();
        let cache = tmp.path().join("go-mod");
        std::fs::create_dir_all(cache.join("bin")).unwrap();
        std::fs::write(cache.join("bin/app"), "ELF").unwrap();
        let launch = Layer::new("app-binary", tmp.path().join("app-binary"));
        let app_name = AppName::new("app").unwrap();

        BinaryStage::new(&cache, &app_name).populate(&launch).unwrap();

        assert!(!cache.join("bin/app").exists());
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("app-binary/app")).unwrap(),
            "ELF"
        );
    }

    #[test]
    fn test_existing_launch_root_is_fine() {
        let tmp = TempDir::new().unwrap();
        let cache = tmp.path().join("go-mod");
        std::fs::create_dir_all(cache.join("bin")).unwrap();
        std::fs::write(cache.join("bin/app"), "ELF").unwrap();
        let launch = Layer::new("app-binary", tmp.path().join("app-binary"));
        std::fs::create_dir_all(launch.root()).unwrap();
        let app_name = AppName::new("app").unwrap();

        BinaryStage::new(&cache, &app_name).populate(&launch).unwrap();
        assert!(launch.root().join("app").is_file());
    }

    #[test]
    fn test_missing_binary_is_staging_error_without_output() {
        let tmp = TempDir::new().unwrap();
        let cache = tmp.path().join("go-mod");
        std::fs::create_dir_all(cache.join("bin")).unwrap();
        std::fs::write(cache.join("bin/other"), "ELF").unwrap();
        let launch = Layer::new("app-binary", tmp.path().join("app-binary"));
        let app_name = AppName::new("app").unwrap();

        let err = BinaryStage::new(&cache, &app_name)
            .populate(&launch)
            .unwrap_err();

        match err {
            ContributeError::Staging { from, source, .. } => {
                assert_eq!(from, cache.join("bin/app"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected Staging, got {:?}", other),
        }
        assert!(!launch.root().exists());
    }
}
