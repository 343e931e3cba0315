// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation result types.

use crate::cli::args::OutputFormat;
use console::{style, Style};

use super::table::Severity;

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Name of the rule that failed.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    pub suggestion: Option<String>,
    /// Severity of the failed rule.
    pub severity: Severity,
    /// Line number where the issue was found.
    pub line: Option<usize>,
}

impl ValidationIssue {
    /// Whether this issue fails the check.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Format the issue for terminal output.
    pub fn format(&self) -> String {
        let prefix = if self.is_error() {
            style("✗").red().bold()
        } else {
            style("⚠").yellow().bold()
        };

        let code_style = if self.is_error() {
            Style::new().red()
        } else {
            Style::new().yellow()
        };

        let location = self
            .line
            .map(|line| format!(" {}", style(format!("(line {})", line)).dim()))
            .unwrap_or_default();

        let mut output = format!(
            "{} {} {}{}",
            prefix,
            code_style.apply_to(&self.code),
            self.message,
            location
        );

        if let Some(ref suggestion) = self.suggestion {
            output.push_str(&format!(
                "\n  {} {}",
                style("→").dim(),
                style(suggestion).dim()
            ));
        }

        output
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "rule": self.code,
            "severity": self.severity.as_str(),
            "level": self.severity.level(),
            "message": self.message,
            "suggestion": self.suggestion,
            "line": self.line,
        })
    }
}

/// Result of validating a commit message.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// The linted message, comments removed.
    pub message: String,
    /// Where the message came from (a file path or stdin).
    pub source: Option<String>,
    /// Violations of error-severity rules.
    pub errors: Vec<ValidationIssue>,
    /// Violations of warning-severity rules.
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a new validation result.
    pub fn new(message: String) -> Self {
        Self {
            message,
            source: None,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record an issue under its severity.
    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
            Severity::Disabled => {}
        }
    }

    /// Check if the validation passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the total number of issues.
    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Iterate over all issues, errors first.
    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// Find the first issue reported by a rule.
    pub fn find(&self, rule: &str) -> Option<&ValidationIssue> {
        self.issues().find(|issue| issue.code == rule)
    }

    /// Print the result to stdout.
    pub fn print(&self, format: Option<OutputFormat>) {
        match format {
            Some(OutputFormat::Json) => self.print_json(),
            _ => self.print_text(),
        }
    }

    /// Print in text format.
    fn print_text(&self) {
        let first_line = self.message.lines().next().unwrap_or("");
        let status = if self.is_valid() {
            style("✓").green().bold()
        } else {
            style("✗").red().bold()
        };
        match self.source {
            Some(ref source) => println!("{} {} {}", status, style(source).cyan(), first_line),
            None => println!("{} {}", status, first_line),
        }

        for error in &self.errors {
            println!("  {}", error.format());
        }

        for warning in &self.warnings {
            println!("  {}", warning.format());
        }

        println!();
        println!("{}", self.summary());
    }

    /// Build the JSON report.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "valid": self.is_valid(),
            "source": self.source,
            "message": self.message,
            "errors": self.errors.iter().map(ValidationIssue::to_json).collect::<Vec<_>>(),
            "warnings": self.warnings.iter().map(ValidationIssue::to_json).collect::<Vec<_>>(),
        })
    }

    /// Print in JSON format.
    fn print_json(&self) {
        println!(
            "{}",
            serde_json::to_string_pretty(&self.to_json()).unwrap_or_default()
        );
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.is_valid() {
            if self.warnings.is_empty() {
                "Valid".to_string()
            } else {
                format!("Valid ({} warnings)", self.warnings.len())
            }
        } else {
            format!(
                "Invalid ({} errors, {} warnings)",
                self.errors.len(),
                self.warnings.len()
            )
        }
    }
}
