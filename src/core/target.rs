//! Build targets - what `go install` gets asked to build.
//!
//! A target is a package path relative to the application root, such as
//! `./cmd/server` or `example.com/acme/widget/cmd/worker`. Targets are kept
//! exactly as configured: no trimming, no dedup, no normalization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single compilable package path within the application source tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildTarget(String);

impl BuildTarget {
    /// Create a new build target.
    pub fn new(target: impl Into<String>) -> Self {
        BuildTarget(target.into())
    }

    /// Get the target as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The final path component, which is what the toolchain names the
    /// binary after.
    pub fn last_segment(&self) -> &str {
        last_path_segment(&self.0)
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BuildTarget {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BuildTarget {
    fn from(s: &str) -> Self {
        BuildTarget::new(s)
    }
}

impl From<String> for BuildTarget {
    fn from(s: String) -> Self {
        BuildTarget(s)
    }
}

/// The ordered set of targets for one run.
///
/// An empty list is valid and means "let the toolchain pick the default
/// package in the working directory".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTargets {
    targets: Vec<BuildTarget>,
}

impl ResolvedTargets {
    /// An empty target list.
    pub fn empty() -> Self {
        ResolvedTargets {
            targets: Vec::new(),
        }
    }

    /// Split a colon-separated list, keeping every segment verbatim.
    pub fn from_colon_list(list: &str) -> Self {
        list.split(':').map(BuildTarget::from).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// The first target, if any. Its name decides the app name.
    pub fn first(&self) -> Option<&BuildTarget> {
        self.targets.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuildTarget> {
        self.targets.iter()
    }
}

impl FromIterator<BuildTarget> for ResolvedTargets {
    fn from_iter<I: IntoIterator<Item = BuildTarget>>(iter: I) -> Self {
        ResolvedTargets {
            targets: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<String>> for ResolvedTargets {
    fn from(targets: Vec<String>) -> Self {
        targets.into_iter().map(BuildTarget::from).collect()
    }
}

impl<'a> IntoIterator for &'a ResolvedTargets {
    type Item = &'a BuildTarget;
    type IntoIter = std::slice::Iter<'a, BuildTarget>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter()
    }
}

impl fmt::Display for ResolvedTargets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.targets.is_empty() {
            return f.write_str("<default>");
        }
        let joined: Vec<&str> = self.targets.iter().map(BuildTarget::as_str).collect();
        f.write_str(&joined.join(", "))
    }
}

/// Last `/`-separated segment of a path-like string.
pub(crate) fn last_path_segment(s: &str) -> &str {
    s.rsplit('/').next().unwrap_or(s)
}
