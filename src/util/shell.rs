//! CLI output.
//!
//! Human mode prints right-aligned status words on stderr; JSON mode prints
//! one event object per line on stdout and nothing else. Toolchain output
//! is not routed through here, `go install` writes to the inherited
//! stdout/stderr directly.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Width the status word is right-aligned to.
const STATUS_WIDTH: usize = 12;

/// Human or JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellMode {
    Human { quiet: bool, color: ColorChoice },
    Json,
}

/// `--color` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Color when stderr is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "invalid color choice '{}'; expected 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

/// Status word at the start of a human output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Compiling,
    Finished,
    Removed,
}

impl Status {
    fn as_str(&self) -> &'static str {
        match self {
            Status::Compiling => "Compiling",
            Status::Finished => "Finished",
            Status::Removed => "Removed",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Status::Finished | Status::Removed => "\x1b[1;32m",
            Status::Compiling => "\x1b[1;36m",
        }
    }
}

/// Output sink shared by the commands.
#[derive(Debug)]
pub struct Shell {
    mode: ShellMode,
    use_color: bool,
}

impl Shell {
    pub fn new(mode: ShellMode) -> Self {
        let use_color = match mode {
            ShellMode::Json => false,
            ShellMode::Human { color, .. } => match color {
                ColorChoice::Auto => io::stderr().is_terminal(),
                ColorChoice::Always => true,
                ColorChoice::Never => false,
            },
        };

        Shell { mode, use_color }
    }

    /// Build a shell from the global CLI flags. `--message-format json`
    /// overrides `--quiet`.
    pub fn from_flags(quiet: bool, color: ColorChoice, json: bool) -> Self {
        let mode = if json {
            ShellMode::Json
        } else {
            ShellMode::Human { quiet, color }
        };

        Shell::new(mode)
    }

    pub fn is_quiet(&self) -> bool {
        matches!(self.mode, ShellMode::Human { quiet: true, .. })
    }

    pub fn is_json(&self) -> bool {
        self.mode == ShellMode::Json
    }

    fn prints_status(&self) -> bool {
        !self.is_json() && !self.is_quiet()
    }

    /// Print `{status:>12} {message}` on stderr.
    ///
    /// Nothing is printed in quiet or JSON mode.
    pub fn status(&self, status: Status, msg: impl Display) {
        if self.prints_status() {
            eprintln!("{} {}", self.format_status(status), msg);
        }
    }

    /// Print a JSON event on stdout. Ignored in human mode.
    pub fn json_event(&self, event: &serde_json::Value) {
        if !self.is_json() {
            return;
        }

        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", event);
        let _ = stdout.flush();
    }

    fn format_status(&self, status: Status) -> String {
        if self.use_color {
            format!(
                "{}{:>width$}\x1b[0m",
                status.color_code(),
                status.as_str(),
                width = STATUS_WIDTH
            )
        } else {
            format!("{:>width$}", status.as_str(), width = STATUS_WIDTH)
        }
    }

    /// Print the start line now; [`Span::finish_with_message`] prints the
    /// `Finished` line with the elapsed time.
    pub fn span(self: &Arc<Self>, status: Status, msg: impl Display) -> Span {
        self.status(status, msg);
        Span {
            shell: Arc::clone(self),
            start: Instant::now(),
            finished: false,
        }
    }
}

/// A timed step started by [`Shell::span`].
pub struct Span {
    shell: Arc<Shell>,
    start: Instant,
    finished: bool,
}

impl Span {
    pub fn finish_with_message(mut self, msg: impl Display) {
        self.finished = true;
        self.shell.status(
            Status::Finished,
            format!("{} in {}", msg, format_duration(self.start.elapsed())),
        );
    }
}

impl Drop for Span {
    fn drop(&mut self) {
        if !self.finished {
            tracing::debug!(
                "step abandoned after {}",
                format_duration(self.start.elapsed())
            );
        }
    }
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 60.0 {
        format!("{:.2}s", secs)
    } else {
        format!("{:.1}m", secs / 60.0)
    }
}
