//! Go build stages.
//!
//! Each stage fills one layer or writes one piece of launch metadata:
//! - [`ModuleCacheStage`]: `go install` into the `go-mod` layer
//! - [`BinaryStage`]: move the binary into the `app-binary` layer
//! - [`write_start_command`]: register the binary as the `web` process

pub mod binary;
pub mod module_cache;
pub mod start_command;
pub mod toolchain;

pub use binary::BinaryStage;
pub use module_cache::ModuleCacheStage;
pub use start_command::write_start_command;
pub use toolchain::GoToolchain;
