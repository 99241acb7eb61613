//! `gomod cleanup` command

use std::sync::Arc;

use anyhow::Result;

use crate::cli::CleanupArgs;
use gomod::ops::cleanup;
use gomod::util::shell::{Shell, Status};

pub fn execute(args: CleanupArgs, shell: &Arc<Shell>) -> Result<()> {
    let app_root = match args.app_root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    if let Err(e) = cleanup(&app_root) {
        shell.json_event(&serde_json::json!({
            "reason": "cleanup-finished",
            "success": false,
            "kind": e.kind(),
            "message": e.to_string(),
        }));
        return Err(e.into());
    }

    shell.status(Status::Removed, format!("contents of {}", app_root.display()));
    shell.json_event(&serde_json::json!({
        "reason": "cleanup-finished",
        "success": true,
        "app_root": app_root.display().to_string(),
    }));

    Ok(())
}
