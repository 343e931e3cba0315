// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for the clint application.
//!
//! Load-time problems (a malformed rule tuple, an unknown preset) are fatal
//! and surface through [`ClintError`]. Rule failures are not errors: they are
//! collected as issues in a [`crate::rules::ValidationResult`].

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for clint operations.
#[derive(Error, Debug)]
pub enum ClintError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Lint outcome errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // Commit message errors
    #[error("Commit error: {0}")]
    Commit(#[from] CommitError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    /// A rule entry does not have the `[severity, applicability, parameter?]` shape.
    #[error("Invalid entry for rule '{rule}': {message}")]
    Shape { rule: String, message: String },

    #[error("Unknown rule '{rule}'")]
    UnknownRule { rule: String },

    #[error("Unknown preset '{name}' in extends")]
    UnknownPreset { name: String },

    #[error("Cyclic extends chain through {path}")]
    CyclicExtends { path: PathBuf },
}

impl ConfigError {
    /// Shorthand for a shape error on a named rule.
    pub fn shape(rule: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Shape {
            rule: rule.into(),
            message: message.into(),
        }
    }
}

/// Lint outcome errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Commit message failed {errors} rule(s) with {warnings} warning(s)")]
    Failed { errors: usize, warnings: usize },
}

/// Commit message errors.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Empty commit message")]
    EmptyMessage,

    #[error("Failed to read commit message from {source_name}: {message}")]
    ReadFailed {
        source_name: String,
        message: String,
    },
}

/// Result type alias for clint operations.
pub type Result<T> = std::result::Result<T, ClintError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ClintError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}
