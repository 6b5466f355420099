//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use honest_core::domain::PackageManager;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "honestjs",
    bin_name = "honestjs",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "CLI for the honestjs web framework",
    long_about = "Create honestjs projects from the official templates and \
                  generate controllers, services, modules and more.",
    after_help = "EXAMPLES:\n\
        \x20 honestjs new my-api --template barebone --yes\n\
        \x20 honestjs list --category starter\n\
        \x20 honestjs g controller user\n\
        \x20 honestjs completions bash > /usr/share/bash-completion/completions/honestjs",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from a template.
    #[command(
        about = "Create a new honestjs project",
        after_help = "EXAMPLES:\n\
            \x20 honestjs new                                 # interactive\n\
            \x20 honestjs new blog --template mvc -p pnpm\n\
            \x20 honestjs new api --no-docker --no-install --yes"
    )]
    New(NewArgs),

    /// List available templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 honestjs list\n\
            \x20 honestjs list --category starter\n\
            \x20 honestjs list --tag api --json"
    )]
    List(ListArgs),

    /// Show CLI and environment information.
    #[command(about = "Display CLI and template information")]
    Info,

    /// Generate a building block in the current project.
    #[command(
        visible_alias = "g",
        about = "Generate a new schematic",
        after_help = "SCHEMATICS:\n\
            \x20 controller (c)   service (s)   module (m)   view (v)\n\
            \x20 middleware (c-m) guard (c-g)   filter (c-f) pipe (c-p)\n\n\
            EXAMPLES:\n\
            \x20 honestjs generate controller user\n\
            \x20 honestjs g s user --flat\n\
            \x20 honestjs g c-g auth --path src/security --skip-import"
    )]
    Generate(GenerateArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 honestjs completions bash > ~/.local/share/bash-completion/completions/honestjs\n\
            \x20 honestjs completions zsh  > ~/.zfunc/_honestjs\n\
            \x20 honestjs completions fish > ~/.config/fish/completions/honestjs.fish"
    )]
    Completions(CompletionsArgs),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `honestjs new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Directory name of the new project.
    #[arg(value_name = "PROJECT-NAME", help = "Name of the project")]
    pub name: Option<String>,

    #[arg(
        short = 't',
        long = "template",
        value_name = "TEMPLATE",
        help = "Template to use (barebone, blank, mvc)"
    )]
    pub template: Option<String>,

    #[arg(
        short = 'p',
        long = "package-manager",
        value_name = "MANAGER",
        value_enum,
        help = "Package manager to use"
    )]
    pub package_manager: Option<PackageManagerArg>,

    #[arg(long, overrides_with = "no_typescript", help = "Use TypeScript")]
    pub typescript: bool,
    #[arg(long, overrides_with = "typescript", help = "Skip TypeScript")]
    pub no_typescript: bool,

    #[arg(long, overrides_with = "no_eslint", help = "Add ESLint configuration")]
    pub eslint: bool,
    #[arg(long, overrides_with = "eslint", help = "Skip ESLint")]
    pub no_eslint: bool,

    #[arg(long, overrides_with = "no_prettier", help = "Add Prettier configuration")]
    pub prettier: bool,
    #[arg(long, overrides_with = "prettier", help = "Skip Prettier")]
    pub no_prettier: bool,

    #[arg(long, overrides_with = "no_docker", help = "Add Docker configuration")]
    pub docker: bool,
    #[arg(long, overrides_with = "docker", help = "Skip Docker")]
    pub no_docker: bool,

    #[arg(long, overrides_with = "no_git", help = "Initialize git repository")]
    pub git: bool,
    #[arg(long, overrides_with = "git", help = "Skip git initialization")]
    pub no_git: bool,

    #[arg(
        long,
        overrides_with = "no_install",
        help = "Install dependencies after creation"
    )]
    pub install: bool,
    #[arg(long, overrides_with = "install", help = "Skip dependency installation")]
    pub no_install: bool,

    /// Skip the prompts.
    #[arg(short = 'y', long = "yes", help = "Skip prompts and use defaults")]
    pub yes: bool,
}

impl NewArgs {
    /// Tri-state view of a `--x` / `--no-x` pair.
    pub fn feature(&self, key: &str) -> Option<bool> {
        let (on, off) = match key {
            "typescript" => (self.typescript, self.no_typescript),
            "eslint" => (self.eslint, self.no_eslint),
            "prettier" => (self.prettier, self.no_prettier),
            "docker" => (self.docker, self.no_docker),
            "git" => (self.git, self.no_git),
            "install" => (self.install, self.no_install),
            _ => return None,
        };
        match (on, off) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// `--package-manager` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum PackageManagerArg {
    Bun,
    Npm,
    Yarn,
    Pnpm,
}

impl From<PackageManagerArg> for PackageManager {
    fn from(arg: PackageManagerArg) -> Self {
        match arg {
            PackageManagerArg::Bun => Self::Bun,
            PackageManagerArg::Npm => Self::Npm,
            PackageManagerArg::Yarn => Self::Yarn,
            PackageManagerArg::Pnpm => Self::Pnpm,
        }
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `honestjs list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(short = 'j', long = "json", help = "Output as JSON")]
    pub json: bool,

    #[arg(
        short = 'c',
        long = "category",
        value_name = "CATEGORY",
        help = "Filter by category"
    )]
    pub category: Option<String>,

    #[arg(short = 't', long = "tag", value_name = "TAG", help = "Filter by tag")]
    pub tag: Option<String>,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `honestjs generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Schematic name or alias (see below).
    #[arg(value_name = "SCHEMATIC", help = "Schematic to generate")]
    pub schematic: String,

    #[arg(value_name = "NAME", help = "Name of the generated artifact")]
    pub name: String,

    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        help = "Directory to create the file in, relative to the project root"
    )]
    pub path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long = "flat",
        help = "Place the file directly in src/ instead of its own folder"
    )]
    pub flat: bool,

    #[arg(long = "skip-import", help = "Do not print an import statement")]
    pub skip_import: bool,

    #[arg(long = "export", help = "Print a re-export line instead of an import")]
    pub export: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `honestjs completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
