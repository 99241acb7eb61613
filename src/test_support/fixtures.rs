//! Test fixtures for Go applications.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A Go module source tree written to disk for a test.
#[derive(Debug, Clone)]
pub struct GoProjectFixture {
    /// Module path declared in `go.mod`.
    pub module: String,
    /// Files (path relative to the app root -> content).
    pub files: BTreeMap<PathBuf, String>,
}

impl GoProjectFixture {
    /// A single-package module with `go.mod` and `main.go`.
    pub fn new(module: impl Into<String>) -> Self {
        let module = module.into();
        let mut files = BTreeMap::new();
        files.insert(PathBuf::from("go.mod"), go_mod(&module));
        files.insert(PathBuf::from("main.go"), main_go().to_string());

        GoProjectFixture { module, files }
    }

    /// Add a `buildpack.yml`.
    pub fn with_buildpack_yml(self, contents: impl Into<String>) -> Self {
        self.with_file("buildpack.yml", contents)
    }

    /// Add a `vendor/` directory.
    pub fn vendored(self) -> Self {
        self.with_file("vendor/modules.txt", "# vendored\n")
    }

    /// Add an arbitrary file.
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Write this fixture under `base/app` and return the app root.
    pub fn write_to(&self, base: &Path) -> std::io::Result<PathBuf> {
        let root = base.join("app");
        std::fs::create_dir_all(&root)?;

        for (path, content) in &self.files {
            let full = root.join(path);
            if let Some(parent) = full.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(full, content)?;
        }

        Ok(root)
    }
}

/// `go.mod` for a module path.
fn go_mod(module: &str) -> String {
    format!("module {}\n\ngo 1.21\n", module)
}

/// A minimal `main` package.
fn main_go() -> &'static str {
    r#"package main

import "fmt"

func main() {
	fmt.Println("hello")
}
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fixture_layout() {
        let tmp = TempDir::new().unwrap();
        let root = GoProjectFixture::new("github.com/acme/widget")
            .vendored()
            .with_buildpack_yml("go:\n  targets: []\n")
            .write_to(tmp.path())
            .unwrap();

        assert!(std::fs::read_to_string(root.join("go.mod"))
            .unwrap()
            .starts_with("module github.com/acme/widget"));
        assert!(root.join("main.go").is_file());
        assert!(root.join("vendor").is_dir());
        assert!(root.join("buildpack.yml").is_file());
    }
}
