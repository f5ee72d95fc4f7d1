//! Clap CLI definitions for the `fprompt` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// fprompt -- an interactive formula prompt.
///
/// Formulas are grouped into nested menus by their dotted names. Pick one,
/// type its inputs, read the result.
#[derive(Parser, Debug)]
#[command(
    name = "fprompt",
    about = "Interactive formula prompt",
    long_about = "Formulas grouped into nested menus by their dotted names. Pick one, type its inputs, read the result.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (default: ./fprompt.yaml if present).
    #[arg(long, global = true, env = fprompt_config::CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Decimal places for results of formulas without their own precision.
    #[arg(long, global = true, conflicts_with = "no_round")]
    pub precision: Option<u32>,

    /// Print results unrounded.
    #[arg(long, global = true)]
    pub no_round: bool,

    /// Run a group's only entry without showing its menu.
    #[arg(long, global = true)]
    pub auto_select: bool,

    /// Leave out the "Add to memory" and "Read from memory" entries.
    #[arg(long, global = true)]
    pub no_memory: bool,

    /// Invalid entries tolerated before an entry is abandoned.
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: Option<u32>,

    /// When to style output.
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Output in JSON format (non-interactive commands).
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output on stderr.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

/// Values of `--color`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive prompt (the default).
    Run,

    /// Print every registered formula, grouped.
    List,

    /// Show or create the configuration file.
    Config(ConfigArgs),

    /// Generate shell completions.
    Completion(CompletionArgs),
}

/// Arguments for `fprompt config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as YAML.
    Show,
    /// Write a default configuration file.
    Init(ConfigInitArgs),
}

/// Arguments for `fprompt config init`.
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file (default: ./fprompt.yaml).
    pub path: Option<PathBuf>,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `fprompt completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}
