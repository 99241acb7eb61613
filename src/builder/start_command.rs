//! Register the app binary as the `web` process.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::{AppName, ContributeError, LaunchMetadata, ProcessEntry};
use crate::layers::MetadataWriter;

/// Write the start command for the staged binary.
///
/// Returns the launch path that was registered.
pub fn write_start_command(
    writer: &dyn MetadataWriter,
    launch_root: &Path,
    app_name: &AppName,
) -> Result<PathBuf, ContributeError> {
    info!("Contributing start command");

    let launch_path = launch_root.join(app_name);
    let metadata = LaunchMetadata::new(vec![ProcessEntry::web(&launch_path)]);
    writer.write_application_metadata(&metadata)?;

    Ok(launch_path)
}
