//! Output management and formatting.
//!
//! Human output goes to stdout through [`console::Term`]; machine output
//! (`list --json`, completions) bypasses the manager so it stays parseable.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format == OutputFormat::Plain,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{2713}', msg, |s| s.green().bold().to_string())
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{26a0}', msg, |s| s.yellow().bold().to_string())
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{2139}', msg, |s| s.blue().bold().to_string())
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        let line = self.paint(text, |s| s.cyan().bold().to_string());
        self.print(&line)
    }

    /// Indented `label: value` row with a dimmed label.
    pub fn field(&self, label: &str, value: &str) -> io::Result<()> {
        let label = format!("{label}:");
        let line = format!("  {} {value}", self.paint(&label, |s| s.dimmed().to_string()));
        self.print(&line)
    }

    /// Indented command suggestion, e.g. `  honestjs list`.
    pub fn command(&self, cmd: &str) -> io::Result<()> {
        let line = format!("  {}", self.paint(cmd, |s| s.cyan().to_string()));
        self.print(&line)
    }

    /// Spinner shown while a long step runs. Hidden unless stdout is a
    /// colour-capable terminal and output is not quiet.
    pub fn spinner(&self, msg: impl Into<String>) -> ProgressBar {
        if self.quiet || self.resolved_format != OutputFormat::Human {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(msg.into());
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    // ── helpers ───────────────────────────────────────────────────────────

    fn marked(&self, mark: char, msg: &str, style: impl Fn(&str) -> String) -> io::Result<()> {
        let line = if self.no_color {
            format!("{mark} {msg}")
        } else {
            format!("{} {msg}", style(&mark.to_string()))
        };
        self.print(&line)
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> String) -> String {
        if self.no_color {
            text.to_owned()
        } else {
            style(text)
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
