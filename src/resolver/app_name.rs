//! Derive the application name.
//!
//! The toolchain names an installed binary after the last path component
//! of the package. With explicit targets that is the first target's last
//! segment; without targets it is the last segment of the main module
//! path reported by `go list -m`.

use std::path::Path;

use tracing::debug;

use crate::builder::toolchain::GoToolchain;
use crate::core::target::last_path_segment;
use crate::core::{AppName, ContributeError, ResolvedTargets};
use crate::util::process::Runner;

/// Work out the binary name for this build.
pub fn derive_app_name(
    targets: &ResolvedTargets,
    app_root: &Path,
    runner: &dyn Runner,
    toolchain: &GoToolchain,
) -> Result<AppName, ContributeError> {
    if let Some(first) = targets.first() {
        let name = first.last_segment();
        debug!("app name `{}` from target `{}`", name, first);
        return AppName::new(name).ok_or_else(|| ContributeError::ToolchainQuery {
            command: format!("target `{}`", first),
            message: "target path has an empty final segment, no toolchain query was run"
                .to_string(),
        });
    }

    let cmd = toolchain.list_module(app_root);
    let query_err = |message: String| ContributeError::ToolchainQuery {
        command: cmd.display_command(),
        message,
    };

    let output = runner
        .run_with_output(&cmd, false)
        .map_err(|e| query_err(format!("{:#}", e)))?;
    let name = module_name_from_output(&output);
    debug!("app name `{}` from module query", name);

    AppName::new(name).ok_or_else(|| query_err(format!("no module path in output {:?}", output)))
}

/// Last segment of the module path on the final line of `go list -m`.
///
/// Anything printed before the final line (download progress, warnings)
/// is ignored.
pub fn module_name_from_output(output: &str) -> &str {
    let last_line = output.trim_end().lines().last().unwrap_or("");
    last_path_segment(last_line.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeRunner;

    #[test]
    fn test_name_from_first_target() {
        let targets = ResolvedTargets::from_colon_list("cmd/foo/bar:cmd/other");
        let runner = FakeRunner::new();

        let name = derive_app_name(&targets, Path::new("/app"), &runner, &GoToolchain::default())
            .unwrap();

        assert_eq!(name.as_str(), "bar");
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_name_from_module_query() {
        let runner = FakeRunner::new().with_output(
            "go list -m",
            "go: downloading example.com/dep v1.0.0\nexample.com/mod/name\n",
        );

        let name = derive_app_name(
            &ResolvedTargets::empty(),
            Path::new("/app"),
            &runner,
            &GoToolchain::default(),
        )
        .unwrap();

        assert_eq!(name.as_str(), "name");
        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].get_cwd(), Some(Path::new("/app")));
    }

    #[test]
    fn test_single_segment_module() {
        assert_eq!(module_name_from_output("widget"), "widget");
        assert_eq!(module_name_from_output("github.com/acme/widget\n"), "widget");
        assert_eq!(module_name_from_output("a\nb/c\r\n"), "c");
    }

    #[test]
    fn test_query_failure() {
        let runner = FakeRunner::new().fail_on("go list", "go: cannot find main module");

        let err = derive_app_name(
            &ResolvedTargets::empty(),
            Path::new("/app"),
            &runner,
            &GoToolchain::default(),
        )
        .unwrap_err();

        match err {
            ContributeError::ToolchainQuery { command, message } => {
                assert_eq!(command, "go list -m");
                assert!(message.contains("cannot find main module"));
            }
            other => panic!("expected ToolchainQuery, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_query_output() {
        let runner = FakeRunner::new().with_output("go list -m", "\n");

        let err = derive_app_name(
            &ResolvedTargets::empty(),
            Path::new("/app"),
            &runner,
            &GoToolchain::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ContributeError::ToolchainQuery { .. }));
    }

    #[test]
    fn test_trailing_slash_target() {
        let targets = ResolvedTargets::from_colon_list("cmd/foo/");
        let runner = FakeRunner::new();
        let err = derive_app_name(&targets, Path::new("/app"), &runner, &GoToolchain::default())
            .unwrap_err();

        match err {
            ContributeError::ToolchainQuery { command, message } => {
                assert_eq!(command, "target `cmd/foo/`");
                assert!(message.contains("no toolchain query was run"));
            }
            other => panic!("expected ToolchainQuery, got {:?}", other),
        }
        assert!(runner.calls().is_empty());
    }
}
