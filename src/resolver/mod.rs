//! Resolution of what to build and what to call it.

pub mod app_name;
pub mod targets;

pub use app_name::{derive_app_name, module_name_from_output};
pub use targets::TargetResolver;
