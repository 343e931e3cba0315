// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! clint - Conventional commit message linter
//!
//! Checks commit messages against a declarative rule table.
//!
//! # Features
//!
//! - **Rule Table**: Rules written as `[severity, applicability, parameter?]`
//!   tuples, validated at load time
//! - **Presets**: Extend the built-in conventional preset or other files
//! - **Rule Engine**: Every enabled rule runs; violations are collected
//!   with their severity
//! - **Machine Output**: JSON reports for CI
//!
//! # Example
//!
//! ```no_run
//! use clint::config::ClintConfig;
//! use clint::rules::RuleEngine;
//!
//! // Load configuration and resolve its extends chain
//! let config = ClintConfig::load().unwrap();
//! let engine = RuleEngine::from_config(&config).unwrap();
//!
//! let result = engine.validate_string("feat(api): add login flow").unwrap();
//! assert!(result.is_valid());
//! ```

// Module declarations
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod rules;

// Re-exports for convenience
pub use config::ClintConfig;
pub use error::{ClintError, Result};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of clint.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// The date clint was built (if available).
    pub const BUILD_DATE: Option<&str> = option_env!("VERGEN_BUILD_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        let short_sha = GIT_SHA.map(|sha| sha.chars().take(7).collect::<String>());
        match (short_sha, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => format!("{} ({} {})", VERSION, sha, date),
            (Some(sha), None) => format!("{} ({})", VERSION, sha),
            _ => VERSION.to_string(),
        }
    }

}
