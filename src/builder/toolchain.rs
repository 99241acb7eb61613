//! The Go toolchain: command lines for `go install` and `go list -m`.

use std::path::{Path, PathBuf};

use crate::core::ResolvedTargets;
use crate::util::process::{find_go, ProcessBuilder};

/// Build mode passed to `go install`.
pub const BUILD_MODE: &str = "pie";

/// Build tags passed to `go install`.
pub const BUILD_TAGS: &str = "cloudfoundry";

/// Flag that makes the toolchain use `vendor/` instead of the network.
pub const VENDOR_FLAG: &str = "-mod=vendor";

/// Environment variable the toolchain installs binaries under.
pub const GOPATH_ENV: &str = "GOPATH";

/// Handle on a `go` executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoToolchain {
    program: PathBuf,
}

impl GoToolchain {
    /// Use a specific `go` binary.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        GoToolchain {
            program: program.into(),
        }
    }

    /// Find `go` via `GOROOT` or `PATH`, falling back to plain `go`.
    pub fn detect() -> Self {
        let program = find_go().unwrap_or_else(|| PathBuf::from("go"));
        tracing::debug!("using go toolchain at {}", program.display());
        GoToolchain::new(program)
    }

    /// `go install -buildmode pie -tags cloudfoundry [-mod=vendor] [targets...]`
    /// with `GOPATH` pointing at the module cache layer.
    pub fn install(
        &self,
        app_root: &Path,
        gopath: &Path,
        vendored: bool,
        targets: &ResolvedTargets,
    ) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(&self.program)
            .args(["install", "-buildmode", BUILD_MODE, "-tags", BUILD_TAGS])
            .env(GOPATH_ENV, gopath.to_string_lossy())
            .cwd(app_root);

        if vendored {
            cmd = cmd.arg(VENDOR_FLAG);
        }

        cmd.args(targets.iter().map(|t| t.as_str()))
    }

    /// `go list -m`: prints the main module path.
    pub fn list_module(&self, app_root: &Path) -> ProcessBuilder {
        ProcessBuilder::new(&self.program)
            .args(["list", "-m"])
            .cwd(app_root)
    }
}

impl Default for GoToolchain {
    fn default() -> Self {
        GoToolchain::new("go")
    }
}
