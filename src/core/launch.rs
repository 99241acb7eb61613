//! Launch metadata: the processes the launcher can start.
//!
//! Serialized as the CNB `launch.toml`:
//!
//! ```toml
//! [[processes]]
//! type = "web"
//! command = "/layers/gomod/app-binary/widget"
//! direct = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Process type for the application's entry point.
pub const WEB_PROCESS_TYPE: &str = "web";

/// A named runtime process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessEntry {
    /// Process type (`web`, `worker`, ...).
    #[serde(rename = "type")]
    pub process_type: String,

    /// Absolute path of the executable to run.
    pub command: PathBuf,

    /// Run the command without a shell.
    #[serde(default)]
    pub direct: bool,
}

impl ProcessEntry {
    pub fn new(process_type: impl Into<String>, command: impl AsRef<Path>) -> Self {
        ProcessEntry {
            process_type: process_type.into(),
            command: command.as_ref().to_path_buf(),
            direct: false,
        }
    }

    /// The `web` process for the given executable.
    pub fn web(command: impl AsRef<Path>) -> Self {
        ProcessEntry::new(WEB_PROCESS_TYPE, command)
    }
}

/// Contents of `launch.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchMetadata {
    #[serde(default)]
    pub processes: Vec<ProcessEntry>,
}

impl LaunchMetadata {
    pub fn new(processes: Vec<ProcessEntry>) -> Self {
        LaunchMetadata { processes }
    }
}
