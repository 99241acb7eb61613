//! gomod CLI - build step of the Go modules buildpack

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gomod::util::shell::Shell;

mod cli;
mod commands;

use cli::{Cli, Commands, MessageFormat};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("gomod=debug")
    } else if cli.quiet {
        EnvFilter::new("gomod=warn")
    } else {
        EnvFilter::new("gomod=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let shell = Arc::new(Shell::from_flags(
        cli.quiet,
        cli.color,
        cli.message_format == MessageFormat::Json,
    ));

    match cli.command {
        Commands::Build(args) => commands::build::execute(args, &shell),
        Commands::Cleanup(args) => commands::cleanup::execute(args, &shell),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
