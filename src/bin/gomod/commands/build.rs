//! `gomod build` command

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::cli::BuildArgs;
use gomod::builder::GoToolchain;
use gomod::ops::Contributor;
use gomod::util::config::TARGETS_ENV;
use gomod::util::shell::{Shell, Status};
use gomod::util::{BuildContext, CommandRunner};
use gomod::FsLayers;

pub fn execute(args: BuildArgs, shell: &Arc<Shell>) -> Result<()> {
    let ctx = match args.app_root {
        Some(root) => BuildContext::new(root, &args.layers_dir),
        None => BuildContext::from_cwd(&args.layers_dir)?,
    }
    .with_platform_dir(args.platform_dir)
    .with_plan_path(args.plan_path);

    // The plan carries no settings this buildpack reads.
    if let Some(plan) = ctx.plan_path() {
        debug!("ignoring buildpack plan {}", plan.display());
    }

    // Process env (or --targets) wins over the platform env directory.
    let targets = match args.targets.filter(|t| !t.is_empty()) {
        Some(targets) => Some(targets),
        None => ctx
            .platform_env(TARGETS_ENV)?
            .map(|v| v.trim_end_matches(['\r', '\n']).to_string()),
    };

    let runner = CommandRunner;
    let layers = FsLayers::new(ctx.layers_dir());
    let contributor = Contributor::from_context(&ctx, &runner, &layers, &layers)
        .with_toolchain(GoToolchain::detect())
        .with_targets_override(targets);

    let span = shell.span(Status::Compiling, ctx.app_root().display());

    match contributor.contribute() {
        Ok(contribution) => {
            shell.json_event(&serde_json::json!({
                "reason": "build-finished",
                "success": true,
                "app_name": contribution.app_name.to_string(),
                "targets": contribution
                    .targets
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>(),
                "command": contribution.launch_path.display().to_string(),
            }));
            span.finish_with_message(format!(
                "`{}` -> {}",
                contribution.app_name,
                contribution.launch_path.display()
            ));
            Ok(())
        }
        Err(e) => {
            shell.json_event(&serde_json::json!({
                "reason": "build-finished",
                "success": false,
                "kind": e.kind(),
                "message": e.to_string(),
            }));
            Err(e.into())
        }
    }
}
