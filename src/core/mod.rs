//! Core data structures.
//!
//! - Build targets and the resolved target list
//! - The application name
//! - Launch metadata (process entries)
//! - The contribution error type

pub mod app_name;
pub mod errors;
pub mod launch;
pub mod target;

pub use app_name::AppName;
pub use errors::ContributeError;
pub use launch::{LaunchMetadata, ProcessEntry, WEB_PROCESS_TYPE};
pub use target::{BuildTarget, ResolvedTargets};
