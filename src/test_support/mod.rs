//! Test utilities and fakes for unit tests.
//!
//! This module provides substitutes for the collaborators the contributor
//! talks to: a [`FakeRunner`] that records toolchain invocations instead of
//! running them, and [`FakeLayers`] that records layer contributions and
//! launch metadata.
//!
//! # Example
//!
//! ```rust,ignore
//! use gomod::test_support::{FakeLayers, FakeRunner};
//!
//! #[test]
//! fn test_example() {
//!     let runner = FakeRunner::new()
//!         .with_output("go list -m", "github.com/acme/widget")
//!         .produces_binary("widget");
//!     let layers = FakeLayers::new("/tmp/layers");
//!
//!     // Use fakes in tests...
//! }
//! ```

pub mod fixtures;

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

pub use fixtures::*;

use crate::core::{ContributeError, LaunchMetadata};
use crate::layers::{Layer, LayerFlags, LayerManager, LayerMetadata, MetadataWriter, PopulateFn};
use crate::util::process::{ProcessBuilder, Runner};

/// What a matched command does.
#[derive(Debug, Clone)]
enum FakeResponse {
    Output(String),
    Failure(String),
}

/// Runner that records commands instead of spawning them.
///
/// Responses are keyed by a prefix of the displayed command line; the first
/// matching prefix wins. Commands that match nothing succeed with empty
/// output.
#[derive(Debug, Default)]
pub struct FakeRunner {
    responses: Vec<(String, FakeResponse)>,
    binary: Option<String>,
    calls: RefCell<Vec<ProcessBuilder>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        FakeRunner::default()
    }

    /// Commands starting with `prefix` succeed with `output`.
    pub fn with_output(mut self, prefix: &str, output: &str) -> Self {
        self.responses
            .push((prefix.to_string(), FakeResponse::Output(output.to_string())));
        self
    }

    /// Commands starting with `prefix` fail with `message`.
    pub fn fail_on(mut self, prefix: &str, message: &str) -> Self {
        self.responses
            .push((prefix.to_string(), FakeResponse::Failure(message.to_string())));
        self
    }

    /// A successful `install` leaves `<GOPATH>/bin/<name>` behind, like the
    /// real toolchain.
    pub fn produces_binary(mut self, name: &str) -> Self {
        self.binary = Some(name.to_string());
        self
    }

    /// All commands run so far, in order.
    pub fn calls(&self) -> Vec<ProcessBuilder> {
        self.calls.borrow().clone()
    }

    fn respond(&self, cmd: &ProcessBuilder) -> Result<String> {
        self.calls.borrow_mut().push(cmd.clone());
        let full_cmd = cmd.display_command();

        match self
            .responses
            .iter()
            .find(|(prefix, _)| full_cmd.starts_with(prefix.as_str()))
            .map(|(_, response)| response)
        {
            Some(FakeResponse::Failure(message)) => {
                bail!("`{}` failed with exit code Some(1)\n{}", full_cmd, message)
            }
            Some(FakeResponse::Output(output)) => Ok(output.clone()),
            None => Ok(String::new()),
        }
    }
}

impl Runner for FakeRunner {
    fn run(&self, cmd: &ProcessBuilder, _quiet: bool) -> Result<()> {
        self.respond(cmd)?;

        let is_install = cmd.get_args().first().map(String::as_str) == Some("install");
        if let (true, Some(name), Some(gopath)) = (is_install, &self.binary, cmd.get_env("GOPATH")) {
            let bin = Path::new(gopath).join("bin");
            std::fs::create_dir_all(&bin)?;
            std::fs::write(bin.join(name), "\x7fELF")?;
        }

        Ok(())
    }

    fn run_with_output(&self, cmd: &ProcessBuilder, _quiet: bool) -> Result<String> {
        self.respond(cmd)
    }
}

/// Layer manager that always populates and remembers what it was asked.
#[derive(Debug)]
pub struct FakeLayers {
    root: PathBuf,
    contributions: RefCell<Vec<(String, LayerFlags)>>,
    identities: RefCell<Vec<Option<LayerMetadata>>>,
    launch: RefCell<Option<LaunchMetadata>>,
    fail_metadata: bool,
}

impl FakeLayers {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FakeLayers {
            root: root.into(),
            contributions: RefCell::new(Vec::new()),
            identities: RefCell::new(Vec::new()),
            launch: RefCell::new(None),
            fail_metadata: false,
        }
    }

    /// Make every metadata write fail.
    pub fn fail_metadata_write(mut self) -> Self {
        self.fail_metadata = true;
        self
    }

    /// Layers contributed so far, with their flags.
    pub fn contributions(&self) -> Vec<(String, LayerFlags)> {
        self.contributions.borrow().clone()
    }

    /// Identities passed with each contribution.
    pub fn identities(&self) -> Vec<Option<LayerMetadata>> {
        self.identities.borrow().clone()
    }

    /// The last launch metadata written.
    pub fn launch_metadata(&self) -> Option<LaunchMetadata> {
        self.launch.borrow().clone()
    }
}

impl LayerManager for FakeLayers {
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
        self.contributions
            .borrow_mut()
            .push((layer.name().to_string(), flags));
        self.identities.borrow_mut().push(identity.cloned());
        populate(layer)
    }
}

impl MetadataWriter for FakeLayers {
    fn write_application_metadata(&self, metadata: &LaunchMetadata) -> Result<(), ContributeError> {
        if self.fail_metadata {
            return Err(ContributeError::MetadataWrite {
                path: self.root.join("launch.toml"),
                message: "rejected by test".to_string(),
            });
        }
        *self.launch.borrow_mut() = Some(metadata.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_runner_records_calls() {
        let runner = FakeRunner::new().with_output("go list", "example.com/mod");

        let out = runner
            .run_with_output(&ProcessBuilder::new("go").args(["list", "-m"]), true)
            .unwrap();
        assert_eq!(out, "example.com/mod");

        runner.run(&ProcessBuilder::new("go").arg("version"), true).unwrap();

        let calls: Vec<String> = runner.calls().iter().map(|c| c.display_command()).collect();
        assert_eq!(calls, vec!["go list -m", "go version"]);
    }

    #[test]
    fn test_fake_runner_failure() {
        let runner = FakeRunner::new().fail_on("go install", "boom");
        let err = runner
            .run(&ProcessBuilder::new("go").arg("install"), false)
            .unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_fake_runner_produces_binary() {
        let tmp = tempfile::TempDir::new().unwrap();
        let runner = FakeRunner::new().produces_binary("widget");
        let cmd = ProcessBuilder::new("go")
            .arg("install")
            .env("GOPATH", tmp.path().to_string_lossy());

        runner.run(&cmd, false).unwrap();
        assert!(tmp.path().join("bin/widget").is_file());
    }

    #[test]
    fn test_first_matching_prefix_wins() {
        let runner = FakeRunner::new()
            .with_output("go list -m", "example.com/first")
            .with_output("go list", "example.com/second");

        let out = runner
            .run_with_output(&ProcessBuilder::new("go").args(["list", "-m"]), true)
            .unwrap();
        assert_eq!(out, "example.com/first");
    }
}
