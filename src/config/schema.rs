// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! A configuration names the base rule sets it extends and overrides
//! individual rules with raw `[severity, applicability, parameter?]` tuples:
//!
//! ```toml
//! extends = ["@commitlint/config-conventional"]
//!
//! [rules]
//! "subject-max-length" = [2, "always", 72]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::rules::{RawEntry, RuleSet};

/// The main configuration structure for clint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClintConfig {
    /// Base rule sets, applied in order: preset names or paths to other
    /// configuration files.
    #[serde(default)]
    pub extends: Vec<String>,

    /// Local rule overrides.
    #[serde(default)]
    pub rules: BTreeMap<String, RawEntry>,

    /// Directory relative `extends` paths are resolved against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Default for ClintConfig {
    fn default() -> Self {
        super::default::default_config()
    }
}

impl ClintConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }

    /// Resolve the extends chain and local overrides into one rule table.
    pub fn resolve_rules(&self) -> crate::error::Result<RuleSet> {
        super::loader::resolve_rules(self)
    }
}

/// Commit types of the conventional preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Chore,
    Ci,
    Build,
    Revert,
}

impl CommitType {
    /// Get the string representation of the commit type.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Perf => "perf",
            CommitType::Test => "test",
            CommitType::Chore => "chore",
            CommitType::Ci => "ci",
            CommitType::Build => "build",
            CommitType::Revert => "revert",
        }
    }

    /// Get a description of the commit type.
    pub fn description(&self) -> &'static str {
        match self {
            CommitType::Feat => "New feature",
            CommitType::Fix => "Bug fix",
            CommitType::Docs => "Documentation",
            CommitType::Style => "Formatting, missing semicolons, etc",
            CommitType::Refactor => "Code restructuring without changing external behavior",
            CommitType::Perf => "Performance improvements",
            CommitType::Test => "Adding or updating tests",
            CommitType::Chore => "Maintenance tasks",
            CommitType::Ci => "CI/CD changes",
            CommitType::Build => "Build system changes",
            CommitType::Revert => "Reverting a previous commit",
        }
    }

    /// Get all commit types.
    pub fn all() -> &'static [CommitType] {
        &[
            CommitType::Feat,
            CommitType::Fix,
            CommitType::Docs,
            CommitType::Style,
            CommitType::Refactor,
            CommitType::Perf,
            CommitType::Test,
            CommitType::Chore,
            CommitType::Ci,
            CommitType::Build,
            CommitType::Revert,
        ]
    }

    /// All type tags as strings, in declaration order.
    pub fn tags() -> Vec<String> {
        Self::all().iter().map(|t| t.as_str().to_string()).collect()
    }
}

impl std::fmt::Display for CommitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClintConfig::default();
        assert_eq!(config.extends, vec!["@commitlint/config-conventional"]);
        assert_eq!(config.rules.len(), 10);
        assert!(config.rules.contains_key("subject-max-length"));
    }

    #[test]
    fn test_commit_type_tags() {
        let tags = CommitType::tags();
        assert_eq!(tags.len(), 11);
        assert_eq!(tags[0], "feat");
        assert_eq!(tags[10], "revert");
    }

    #[test]
    fn test_commit_type_display() {
        assert_eq!(CommitType::Refactor.to_string(), "refactor");
        assert_eq!(CommitType::Ci.description(), "CI/CD changes");
    }

    #[test]
    fn test_config_serialization() {
        let config = ClintConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("extends"));
        assert!(toml_str.contains("subject-max-length"));
    }
}
