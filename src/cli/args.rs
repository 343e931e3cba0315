// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// clint - Conventional commit message linter
///
/// Checks commit messages against a declarative rule table.
#[derive(Parser, Debug)]
#[command(name = "clint")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Conventional commit message linter", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run (defaults to lint if not specified)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "CLINT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Lint a commit message (default command)
    Lint(LintArgs),

    /// Print the resolved rule table
    Rules,

    /// Initialize clint configuration
    Init(InitArgs),

    /// Print version information
    Version,
}

/// Arguments for the lint command.
#[derive(Parser, Debug, Default, Clone)]
pub struct LintArgs {
    /// File holding the commit message (`-` or absent reads stdin)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Strict mode: treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

impl LintArgs {
    /// Whether the message should be read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.file
            .as_deref()
            .map_or(true, |path| path.as_os_str() == "-")
    }
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Configuration preset
    #[arg(long, value_enum)]
    pub preset: Option<ConfigPreset>,
}

/// Configuration presets for init.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigPreset {
    /// Conventional preset plus the project overrides (recommended)
    Default,
    /// Only extend the conventional preset
    Conventional,
    /// Core header rules without a preset
    Minimal,
}

impl Cli {
    /// Get the effective command, defaulting to Lint if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Lint(LintArgs::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_lint() {
        let args = Cli::parse_from(["clint", "lint", ".git/COMMIT_EDITMSG", "--strict"]);
        if let Some(Commands::Lint(lint_args)) = args.command {
            assert_eq!(lint_args.file, Some(PathBuf::from(".git/COMMIT_EDITMSG")));
            assert!(lint_args.strict);
            assert!(!lint_args.reads_stdin());
        } else {
            panic!("Expected Lint command");
        }
    }

    #[test]
    fn test_lint_dash_reads_stdin() {
        let args = Cli::parse_from(["clint", "lint", "-"]);
        if let Some(Commands::Lint(lint_args)) = args.command {
            assert!(lint_args.reads_stdin());
        } else {
            panic!("Expected Lint command");
        }
    }

    #[test]
    fn test_parse_init() {
        let args = Cli::parse_from(["clint", "init", "--preset", "minimal", "--force"]);
        if let Some(Commands::Init(init_args)) = args.command {
            assert_eq!(init_args.preset, Some(ConfigPreset::Minimal));
            assert!(init_args.force);
        } else {
            panic!("Expected Init command");
        }
    }

    #[test]
    fn test_global_flags() {
        let args = Cli::parse_from(["clint", "rules", "--format", "json", "--debug"]);
        assert!(matches!(args.command, Some(Commands::Rules)));
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert!(args.debug);
    }

    #[test]
    fn test_default_command() {
        let args = Cli::parse_from(["clint"]);
        assert!(args.command.is_none());
        match args.effective_command() {
            Commands::Lint(lint_args) => assert!(lint_args.reads_stdin()),
            other => panic!("Expected Lint command, got {:?}", other),
        }
    }
}
