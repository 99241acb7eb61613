//! Reclaim the application workspace after a build.

use std::io;
use std::path::Path;

use tracing::debug;

use crate::core::ContributeError;
use crate::util::fs::{glob_children, remove_path};

/// Delete every immediate child of `app_root`, recursively.
///
/// The root itself stays. An empty root is a no-op.
pub fn cleanup(app_root: &Path) -> Result<(), ContributeError> {
    let children = glob_children(app_root).map_err(|e| ContributeError::Cleanup {
        path: app_root.to_path_buf(),
        source: io::Error::other(format!("{:#}", e)),
    })?;

    for child in children {
        debug!("removing {}", child.display());
        remove_path(&child).map_err(|source| ContributeError::Cleanup {
            path: child.clone(),
            source,
        })?;
    }

    Ok(())
}
