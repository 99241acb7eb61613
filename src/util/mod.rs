//! Shared utilities

pub mod config;
pub mod context;
pub mod fs;
pub mod process;
pub mod shell;

pub use config::BuildpackConfig;
pub use context::BuildContext;
pub use process::{CommandRunner, ProcessBuilder, Runner};
