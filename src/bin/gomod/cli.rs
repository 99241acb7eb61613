//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use gomod::util::config::TARGETS_ENV;
use gomod::util::shell::ColorChoice;

/// gomod - compile a Go modules application into buildpack layers
#[derive(Parser)]
#[command(name = "gomod")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output format for status messages
    #[arg(long, global = true, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    Human,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile the application and contribute its layers
    Build(BuildArgs),

    /// Remove everything under the application root
    Cleanup(CleanupArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Layers directory for this buildpack
    pub layers_dir: PathBuf,

    /// Platform directory
    pub platform_dir: Option<PathBuf>,

    /// Buildpack plan
    pub plan_path: Option<PathBuf>,

    /// Application root (defaults to current directory)
    #[arg(long)]
    pub app_root: Option<PathBuf>,

    /// Colon-separated packages to build
    #[arg(long, env = TARGETS_ENV)]
    pub targets: Option<String>,
}

#[derive(Args)]
pub struct CleanupArgs {
    /// Application root (defaults to current directory)
    #[arg(long)]
    pub app_root: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
