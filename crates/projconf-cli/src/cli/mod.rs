//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use projconf_core::application::Ecosystem;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "projconf",
    bin_name = "projconf",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate project configuration files",
    long_about = "projconf regenerates the boilerplate of a project (README, LICENSE, \
                  NOTICE, CONTRIBUTING, .gitignore, CI workflows, pom.xml, csproj and \
                  solution files) from layered attribute definitions.",
    after_help = "EXAMPLES:\n\
        \x20 cd my-lib/scripts && projconf generate -e java\n\
        \x20 projconf generate -e net -C ../MyLib --set target_framework=6.0\n\
        \x20 projconf show -e fvc pretty_name root_namespace\n\
        \x20 projconf completions bash > /usr/share/bash-completion/completions/projconf",
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
    /// Regenerate a project's configuration files.
    #[command(
        visible_alias = "g",
        about = "Generate configuration files",
        after_help = "EXAMPLES:\n\
            \x20 projconf generate -e java\n\
            \x20 projconf generate -e net -C ~/src/MyLib --dry-run\n\
            \x20 projconf generate -e fvc -s fvc.toml --set is_matcher_part=true"
    )]
    Generate(GenerateArgs),

    /// Print the files a run would write or remove.
    #[command(about = "Show the artifact plan")]
    Plan(PlanArgs),

    /// Resolve attributes and print their values.
    #[command(
        about = "Show attribute values",
        after_help = "EXAMPLES:\n\
            \x20 projconf show -e java pom_group pom_artifact\n\
            \x20 projconf show -e net --toml nuget_title target_framework"
    )]
    Show(ShowArgs),

    /// List every attribute the layer stack defines.
    #[command(visible_alias = "attrs", about = "List attribute names")]
    Attributes(AttributesArgs),

    /// Initialise a projconf configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 projconf init\n\
            \x20 projconf --config ./projconf.toml init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 projconf completions bash > ~/.local/share/bash-completion/completions/projconf\n\
            \x20 projconf completions zsh  > ~/.zfunc/_projconf\n\
            \x20 projconf completions fish > ~/.config/fish/completions/projconf.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the projconf configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 projconf config get identity.code_owner\n\
            \x20 projconf config list\n\
            \x20 projconf config path"
    )]
    Config(ConfigCommands),
}

// ── target selection ──────────────────────────────────────────────────────────

/// Which project to configure and with which layers.
#[derive(Debug, Clone, Args)]
pub struct TargetArgs {
    /// Ecosystem layer stack.
    #[arg(
        short = 'e',
        long = "ecosystem",
        value_name = "ECOSYSTEM",
        value_enum,
        help = "Ecosystem (default: defaults.ecosystem from config)"
    )]
    pub ecosystem: Option<EcosystemArg>,

    /// Project root. Defaults to the parent of the current directory, since
    /// projconf is usually run from the project's `scripts/` directory.
    #[arg(
        short = 'C',
        long = "project-dir",
        value_name = "DIR",
        help = "Project directory (default: parent of current directory)"
    )]
    pub project_dir: Option<PathBuf>,

    /// Project settings file merged over the ecosystem layers.
    #[arg(
        short = 's',
        long = "settings",
        value_name = "FILE",
        help = "Settings file (default: <project>/scripts/projconf.toml if present)"
    )]
    pub settings: Option<PathBuf>,

    /// Attribute overrides, applied after the settings file.
    #[arg(
        long = "set",
        value_name = "KEY=VALUE",
        help = "Override an attribute (repeatable)"
    )]
    pub set: Vec<String>,

    /// Directory holding `license.txt` and `<lang>/gitignore.txt`.
    #[arg(
        short = 'r',
        long = "resource-dir",
        value_name = "DIR",
        help = "Resource directory (default: built-in resources)"
    )]
    pub resource_dir: Option<PathBuf>,
}

/// Arguments for `projconf generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Print the plan without writing anything.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,
}

/// Arguments for `projconf plan`.
#[derive(Debug, Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

/// Arguments for `projconf show`.
#[derive(Debug, Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Attribute names to resolve.
    #[arg(value_name = "ATTRIBUTE", required = true)]
    pub attributes: Vec<String>,

    /// Print the values as a settings file snippet.
    #[arg(long = "toml", help = "Print as TOML settings")]
    pub toml: bool,
}

/// Arguments for `projconf attributes`.
#[derive(Debug, Args)]
pub struct AttributesArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `projconf init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `projconf completions`.
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

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `projconf config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `identity.code_owner`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Supported ecosystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum EcosystemArg {
    /// Also accepted as `maven`.
    #[value(alias = "maven")]
    Java,
    /// Also accepted as `dotnet`.
    #[value(alias = "dotnet")]
    Net,
    Fvc,
}

impl From<EcosystemArg> for Ecosystem {
    fn from(arg: EcosystemArg) -> Self {
        match arg {
            EcosystemArg::Java => Ecosystem::Java,
            EcosystemArg::Net => Ecosystem::Net,
            EcosystemArg::Fvc => Ecosystem::Fvc,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
