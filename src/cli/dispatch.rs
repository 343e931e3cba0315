// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use console::style;
use std::io::Read;
use std::path::Path;

use crate::config::ClintConfig;
use crate::error::{ClintError, CommitError, Result, ResultExt, ValidationError};
use crate::rules::{RuleEngine, Severity};

use super::args::{Cli, Commands, ConfigPreset, InitArgs, LintArgs, OutputFormat};

/// Name of the file written by `clint init`.
const INIT_CONFIG_FILE: &str = "clint.toml";

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    match cli.effective_command() {
        Commands::Lint(args) => run_lint(&cli, &load_config(&cli)?, args),
        Commands::Rules => run_rules(&cli, &load_config(&cli)?),
        Commands::Init(args) => run_init(args),
        Commands::Version => run_version(),
    }
}

fn load_config(cli: &Cli) -> Result<ClintConfig> {
    if let Some(config_path) = &cli.config {
        ClintConfig::load_from(config_path)
    } else {
        ClintConfig::load()
    }
}

/// Run the lint command.
fn run_lint(cli: &Cli, config: &ClintConfig, args: LintArgs) -> Result<()> {
    tracing::debug!("Running lint command with args: {:?}", args);

    let engine = RuleEngine::from_config(config)?;
    let (source, message) = read_message(&args)?;

    let mut result = engine.validate_string(&message)?;
    result.source = Some(source);
    result.print(cli.format);

    if !result.is_valid() || (args.strict && !result.warnings.is_empty()) {
        return Err(ClintError::Validation(ValidationError::Failed {
            errors: result.errors.len(),
            warnings: result.warnings.len(),
        }));
    }

    Ok(())
}

/// Read the message to lint, returning a display name for its source.
fn read_message(args: &LintArgs) -> Result<(String, String)> {
    match args.file {
        Some(ref path) if !args.reads_stdin() => {
            let source = path.display().to_string();
            let message = std::fs::read_to_string(path).map_err(|e| {
                ClintError::Commit(CommitError::ReadFailed {
                    source_name: source.clone(),
                    message: e.to_string(),
                })
            })?;
            Ok((source, message))
        }
        _ => {
            let mut message = String::new();
            std::io::stdin().read_to_string(&mut message).map_err(|e| {
                ClintError::Commit(CommitError::ReadFailed {
                    source_name: "stdin".to_string(),
                    message: e.to_string(),
                })
            })?;
            Ok(("stdin".to_string(), message))
        }
    }
}

/// Run the rules command.
fn run_rules(cli: &Cli, config: &ClintConfig) -> Result<()> {
    tracing::debug!("Running rules command");

    let rules = config.resolve_rules()?;

    if cli.format == Some(OutputFormat::Json) {
        let json =
            serde_json::to_string_pretty(&rules).context("Failed to serialize rule table")?;
        println!("{}", json);
        return Ok(());
    }

    for (name, rule) in rules.iter() {
        let level = match rule.severity {
            Severity::Error => style(rule.severity.as_str()).red(),
            Severity::Warning => style(rule.severity.as_str()).yellow(),
            Severity::Disabled => style(rule.severity.as_str()).dim(),
        };
        let entry = serde_json::to_string(rule).unwrap_or_default();
        println!("{:<24} {:<8} {}", name, level, style(entry).dim());
    }

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("clint {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }
    if let Some(date) = crate::version::BUILD_DATE {
        println!("build date: {}", date);
    }

    Ok(())
}

/// Run the init command.
fn run_init(args: InitArgs) -> Result<()> {
    use crate::config::default::{conventional_config, example_config, minimal_config};

    tracing::debug!("Running init command with args: {:?}", args);

    let config_path = Path::new(INIT_CONFIG_FILE);

    if config_path.exists() && !args.force {
        return Err(ClintError::WithContext {
            context: "init".to_string(),
            message: format!(
                "{} already exists. Use --force to overwrite.",
                config_path.display()
            ),
        });
    }

    let config_content = match args.preset {
        Some(ConfigPreset::Default) | None => example_config(),
        Some(ConfigPreset::Conventional) => conventional_config(),
        Some(ConfigPreset::Minimal) => minimal_config().to_string(),
    };

    crate::config::parse_config(&config_content)?.resolve_rules()?;

    std::fs::write(config_path, config_content).context("Failed to write configuration")?;

    println!("{} Created {}", style("✓").green().bold(), INIT_CONFIG_FILE);

    Ok(())
}
