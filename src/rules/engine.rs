// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine for commit validation.

use crate::commit::CommitMessage;
use crate::config::ClintConfig;
use crate::error::Result;

use super::builtin::{self, BuiltinRule, Finding};
use super::table::{Applicability, RuleConfig, RuleParam, RuleSet};
use super::validator::{ValidationIssue, ValidationResult};

/// Rule engine for validating commit messages against a resolved rule table.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: RuleSet,
}

impl RuleEngine {
    /// Create a new rule engine over a resolved rule table.
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Resolve the configuration's extends chain and build an engine.
    pub fn from_config(config: &ClintConfig) -> Result<Self> {
        Ok(Self::new(config.resolve_rules()?))
    }

    /// The rule table this engine evaluates.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Validate a commit message.
    ///
    /// Every enabled rule runs; one failing rule never stops the others.
    pub fn validate(&self, message: &CommitMessage) -> ValidationResult {
        let mut result = ValidationResult::new(message.raw.clone());

        for (name, rule) in self.rules.enabled() {
            let Some(builtin) = builtin::find(name) else {
                tracing::warn!("Skipping unknown rule '{}'", name);
                continue;
            };

            for finding in builtin.check(message, rule) {
                if rule.applicability.fails(finding.holds) {
                    result.push(issue(name, builtin, rule, finding));
                }
            }
        }

        self.fold_type_enum_into_type_case(message, &mut result);

        tracing::debug!(
            "Validated '{}': {} error(s), {} warning(s)",
            message.header,
            result.errors.len(),
            result.warnings.len()
        );

        result
    }

    /// Validate a commit message string.
    pub fn validate_string(&self, message: &str) -> Result<ValidationResult> {
        let parsed = CommitMessage::parse(message)?;
        Ok(self.validate(&parsed))
    }

    /// A wrongly cased but otherwise allowed type (`Fix`) is one defect;
    /// `type-case` already reports it.
    ///
    /// Only folds when the `type-case` issue is at least as severe as
    /// `type-enum`, so the pass/fail outcome is unchanged.
    fn fold_type_enum_into_type_case(
        &self,
        message: &CommitMessage,
        result: &mut ValidationResult,
    ) {
        let Some(ref commit_type) = message.commit_type else {
            return;
        };
        let Some(type_case) = result.find("type-case") else {
            return;
        };
        let Some(RuleConfig {
            severity,
            applicability: Applicability::Always,
            param: RuleParam::Values(values),
        }) = self.rules.get("type-enum")
        else {
            return;
        };
        if type_case.severity < *severity || !values.contains(&commit_type.to_lowercase()) {
            return;
        }

        result.errors.retain(|issue| issue.code != "type-enum");
        result.warnings.retain(|issue| issue.code != "type-enum");
    }
}

fn issue(
    name: &str,
    builtin: &BuiltinRule,
    rule: &RuleConfig,
    finding: Finding,
) -> ValidationIssue {
    let verb = match rule.applicability {
        Applicability::Always => "must",
        Applicability::Never => "must not",
    };
    let mut message = format!("{} {} {}", builtin.target, verb, finding.condition);
    if let Some(found) = finding.found {
        message.push_str(&format!(" (found {})", found));
    }

    ValidationIssue {
        code: name.to_string(),
        message,
        suggestion: finding.hint,
        severity: rule.severity,
        line: finding.line,
    }
}
