//! The application name: binary filename and process name in one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the compiled binary inside `GOPATH/bin` and the launch layer.
///
/// Always non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppName(String);

impl AppName {
    /// Create an app name, rejecting the empty string.
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            None
        } else {
            Some(AppName(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AppName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<std::path::Path> for AppName {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(&self.0)
    }
}

impl TryFrom<String> for AppName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AppName::new(value).ok_or_else(|| "app name cannot be empty".to_string())
    }
}

impl From<AppName> for String {
    fn from(name: AppName) -> Self {
        name.0
    }
}
