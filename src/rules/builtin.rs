// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in validation rules.
//!
//! Every rule computes a predicate over one part of the commit message. The
//! engine decides whether the outcome is a failure from the rule's
//! applicability: `always` requires the predicate, `never` forbids it.

use crate::commit::CommitMessage;

use super::case::Case;
use super::table::{Applicability, ParamKind, RuleConfig, RuleParam};

/// The outcome of one predicate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Whether the predicate holds.
    pub holds: bool,
    /// The predicate, phrased to follow "must" / "must not".
    pub condition: String,
    /// What was actually seen.
    pub found: Option<String>,
    /// Line number the finding refers to.
    pub line: Option<usize>,
    /// Suggestion for fixing a failure.
    pub hint: Option<String>,
}

impl Finding {
    fn new(holds: bool, condition: impl Into<String>) -> Self {
        Self {
            holds,
            condition: condition.into(),
            found: None,
            line: None,
            hint: None,
        }
    }

    fn found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    fn at(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

type CheckFn = fn(&CommitMessage, &RuleConfig) -> Vec<Finding>;

/// A named rule known to the evaluator.
pub struct BuiltinRule {
    /// Rule name as used in configuration.
    pub name: &'static str,
    /// The part of the message the rule inspects.
    pub target: &'static str,
    /// The parameter shape the rule expects.
    pub kind: ParamKind,
    check: CheckFn,
}

impl BuiltinRule {
    /// Evaluate the rule's predicate against a message.
    ///
    /// Returns no findings when the inspected part is absent.
    pub fn check(&self, message: &CommitMessage, rule: &RuleConfig) -> Vec<Finding> {
        (self.check)(message, rule)
    }
}

impl std::fmt::Debug for BuiltinRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinRule")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("kind", &self.kind)
            .finish()
    }
}

static BUILTIN_RULES: &[BuiltinRule] = &[
    BuiltinRule {
        name: "header-max-length",
        target: "header",
        kind: ParamKind::Length,
        check: check_header_max_length,
    },
    BuiltinRule {
        name: "header-min-length",
        target: "header",
        kind: ParamKind::Length,
        check: check_header_min_length,
    },
    BuiltinRule {
        name: "header-trim",
        target: "header",
        kind: ParamKind::None,
        check: check_header_trim,
    },
    BuiltinRule {
        name: "type-empty",
        target: "type",
        kind: ParamKind::None,
        check: check_type_empty,
    },
    BuiltinRule {
        name: "type-case",
        target: "type",
        kind: ParamKind::Cases,
        check: check_type_case,
    },
    BuiltinRule {
        name: "type-enum",
        target: "type",
        kind: ParamKind::Values,
        check: check_type_enum,
    },
    BuiltinRule {
        name: "type-max-length",
        target: "type",
        kind: ParamKind::Length,
        check: check_type_max_length,
    },
    BuiltinRule {
        name: "scope-empty",
        target: "scope",
        kind: ParamKind::None,
        check: check_scope_empty,
    },
    BuiltinRule {
        name: "scope-case",
        target: "scope",
        kind: ParamKind::Cases,
        check: check_scope_case,
    },
    BuiltinRule {
        name: "scope-enum",
        target: "scope",
        kind: ParamKind::Values,
        check: check_scope_enum,
    },
    BuiltinRule {
        name: "subject-empty",
        target: "subject",
        kind: ParamKind::None,
        check: check_subject_empty,
    },
    BuiltinRule {
        name: "subject-case",
        target: "subject",
        kind: ParamKind::Cases,
        check: check_subject_case,
    },
    BuiltinRule {
        name: "subject-full-stop",
        target: "subject",
        kind: ParamKind::Text,
        check: check_subject_full_stop,
    },
    BuiltinRule {
        name: "subject-max-length",
        target: "subject",
        kind: ParamKind::Length,
        check: check_subject_max_length,
    },
    BuiltinRule {
        name: "subject-min-length",
        target: "subject",
        kind: ParamKind::Length,
        check: check_subject_min_length,
    },
    BuiltinRule {
        name: "body-empty",
        target: "body",
        kind: ParamKind::None,
        check: check_body_empty,
    },
    BuiltinRule {
        name: "body-leading-blank",
        target: "body",
        kind: ParamKind::None,
        check: check_body_leading_blank,
    },
    BuiltinRule {
        name: "body-max-line-length",
        target: "body line",
        kind: ParamKind::Length,
        check: check_body_max_line_length,
    },
    BuiltinRule {
        name: "footer-empty",
        target: "footer",
        kind: ParamKind::None,
        check: check_footer_empty,
    },
    BuiltinRule {
        name: "footer-leading-blank",
        target: "footer",
        kind: ParamKind::None,
        check: check_footer_leading_blank,
    },
    BuiltinRule {
        name: "footer-max-line-length",
        target: "footer line",
        kind: ParamKind::Length,
        check: check_footer_max_line_length,
    },
];

/// Get all built-in rules.
pub fn all() -> &'static [BuiltinRule] {
    BUILTIN_RULES
}

/// Find a built-in rule by name.
pub fn find(name: &str) -> Option<&'static BuiltinRule> {
    BUILTIN_RULES.iter().find(|rule| rule.name == name)
}

/// Get the parameter kind a rule expects, or `None` for unknown rules.
pub fn param_kind(name: &str) -> Option<ParamKind> {
    find(name).map(|rule| rule.kind)
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn max_length(len: usize, max: usize, unit: &str, rule: &RuleConfig) -> Finding {
    let finding = Finding::new(len <= max, format!("be at most {} characters", max))
        .found(format!("{} characters", len));
    if rule.applicability == Applicability::Always {
        finding.hint(format!("Shorten the {} to {} characters or less", unit, max))
    } else {
        finding
    }
}

fn min_length(len: usize, min: usize, unit: &str, rule: &RuleConfig) -> Finding {
    let finding = Finding::new(len >= min, format!("be at least {} characters", min))
        .found(format!("{} characters", len));
    if rule.applicability == Applicability::Always {
        finding.hint(format!("Add more detail to the {}", unit))
    } else {
        finding
    }
}

fn case_condition(cases: &[Case]) -> String {
    match cases {
        [single] => format!("be {}", single),
        many => format!(
            "be one of {}",
            many.iter().map(Case::as_str).collect::<Vec<_>>().join(", ")
        ),
    }
}

fn matches_any(cases: &[Case], text: &str) -> bool {
    cases.iter().any(|case| case.matches(text))
}

fn values_condition(values: &[String]) -> String {
    format!("be one of {}", values.join(", "))
}

/// Scope segments: `feat(api,cli)` and `feat(api/cli)` name two scopes.
fn scope_segments(scope: &str) -> Vec<&str> {
    scope
        .split([',', '/'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn is_blank(line: Option<&str>) -> bool {
    line.map(|l| l.trim().is_empty()).unwrap_or(true)
}

fn check_header_max_length(message: &CommitMessage, rule: &RuleConfig) -> Vec<Finding> {
    let RuleParam::Length(max) = rule.param else {
        return Vec::new();
    };
    vec![max_length(message.header_len(), max, "header", rule).at(1)]
}

fn check_header_min_length(message: &CommitMessage, rule: &RuleConfig) -> Vec<Finding> {
    let RuleParam::Length(min) = rule.param else {
        return Vec::new();
    };
    vec![min_length(message.header_len(), min, "header", rule).at(1)]
}

fn check_header_trim(message: &CommitMessage, _rule: &RuleConfig) -> Vec<Finding> {
    let trimmed = message.header.trim() == message.header;
    vec![Finding::new(trimmed, "be free of surrounding whitespace")
        .at(1)
        .hint("Remove leading and trailing whitespace from the header")]
}

fn check_type_empty(message: &CommitMessage, rule: &RuleConfig) -> Vec<Finding> {
    let finding = Finding::new(message.commit_type.is_none(), "be empty").at(1);
    if rule.applicability == Applicability::Never {
        vec![finding.hint("Start the header with a type: type(scope): subject")]
    } else {
        vec![finding]
    }
}

fn check_type_case(message: &CommitMessage, rule: &RuleConfig) -> Vec<Finding> {
    let (Some(commit_type), RuleParam::Cases(cases)) = (&message.commit_type, &rule.param) else {
        return Vec::new();
    };
    let finding = Finding::new(matches_any(cases, commit_type), case_condition(cases))
        .found(format!("'{}'", commit_type))
        .at(1);
    if rule.applicability == Applicability::Always && cases.as_slice() == [Case::LowerCase] {
        vec![finding.hint(format!("Use '{}'", commit_type.to_lowercase()))]
    } else {
        vec![finding]
    }
}

fn check_type_enum(message: &CommitMessage, rule: &RuleConfig) -> Vec<Finding> {
    let (Some(commit_type), RuleParam::Values(values)) = (&message.commit_type, &rule.param) else {
        return Vec::new();
    };
    let finding = Finding::new(values.contains(commit_type), values_condition(values))
        .found(format!("'{}'", commit_type))
        .at(1);
    if rule.applicability == Applicability::Always {
        vec![finding.hint(format!("Use one of: {}", values.join(", ")))]
    } else {
        vec![finding]
    }
}

fn check_type_max_length(message: &CommitMessage, rule: &RuleConfig) -> Vec<Finding> {
    let (Some(commit_type), RuleParam::Length(max)) = (&message.commit_type, &rule.param) else {
        return Vec::new();
    };
    vec![max_length(char_len(commit_type), *max, "type", rule).at(1)]
}

fn check_scope_empty(message: &CommitMessage, rule: &RuleConfig) -> Vec<Finding> {
    let finding = Finding::new(message.scope.is_none(), "be empty").at(1);
    if rule.applicability == Applicability::Never {
        vec![finding.hint("Add a scope in parentheses: type(scope): subject")]
    } else {
        vec![finding]
    }
}

fn check_scope_case(message: &CommitMessage, rule: &RuleConfig) -> Vec<Finding> {
    let (Some(scope), RuleParam::Cases(cases)) = (&message.scope, &rule.param) else {
        return Vec::new();
    };
    let holds = scope_segments(scope)
        .iter()
        .all(|segment| matches_any(cases, segment));
    vec![Finding::new(holds, case_condition(cases))
        .found(format!("'{}'", scope))
        .at(1)]
}

fn check_scope_enum(message: &CommitMessage, rule: &RuleConfig) -> Vec<Finding> {
    let (Some(scope), RuleParam::Values(values)) = (&message.scope, &rule.param) else {
        return Vec::new();
    };
    let holds = scope_segments(scope)
        .iter()
        .all(|segment| values.iter().any(|v| v == segment));
    let finding = Finding::new(holds, values_condition(values))
        .found(format!("'{}'", scope))
        .at(1);
    if rule.applicability == Applicability::Always {
        vec![finding.hint(format!("Use one of: {}", values.join(", ")))]
    } else {
        vec![finding]
    }
}

fn check_subject_empty(message: &CommitMessage, rule: &RuleConfig) -> Vec<Finding> {
    let finding = Finding::new(message.subject.is_none(), "be empty").at(1);
    if rule.applicability == Applicability::Never {
        vec![finding.hint("Describe the change after the colon")]
    } else {
        vec![finding]
    }
}

/// Only the first word is inspected: "add API client" is lower-case.
fn check_subject_case(message: &CommitMessage, rule: &RuleConfig) -> Vec<Finding> {
    let (Some(subject), RuleParam::Cases(cases)) = (&message.subject, &rule.param) else {
        return Vec::new();
    };
    let Some(first_word) = subject.split_whitespace().next() else {
        return Vec::new();
    };
    let holds = cases
        .iter()
        .any(|case| subject_starts_in(*case, subject, first_word));
    let finding = Finding::new(holds, case_condition(cases))
        .found(format!("'{}'", first_word))
        .at(1);
    if rule.applicability == Applicability::Always && cases.as_slice() == [Case::LowerCase] {
        vec![finding.hint("Start the subject with a lowercase letter")]
    } else {
        vec![finding]
    }
}

/// `lower-case` only asks that the subject start lower-case, so `iOS` passes.
/// Every other style is judged on the whole first word.
fn subject_starts_in(case: Case, subject: &str, first_word: &str) -> bool {
    match case {
        Case::LowerCase => subject
            .chars()
            .find(|c| c.is_lowercase() || c.is_uppercase())
            .map_or(true, char::is_lowercase),
        other => other.matches(first_word),
    }
}

fn check_subject_full_stop(message: &CommitMessage, rule: &RuleConfig) -> Vec<Finding> {
    let (Some(subject), RuleParam::Text(stop)) = (&message.subject, &rule.param) else {
        return Vec::new();
    };
    let finding = Finding::new(
        subject.trim_end().ends_with(stop.as_str()),
        format!("end with '{}'", stop),
    )
    .at(1);
    if rule.applicability == Applicability::Never {
        vec![finding.hint(format!("Remove the trailing '{}'", stop))]
    } else {
        vec![finding]
    }
}

fn check_subject_max_length(message: &CommitMessage, rule: &RuleConfig) -> Vec<Finding> {
    let (Some(subject), RuleParam::Length(max)) = (&message.subject, &rule.param) else {
        return Vec::new();
    };
    vec![max_length(char_len(subject), *max, "subject", rule).at(1)]
}

fn check_subject_min_length(message: &CommitMessage, rule: &RuleConfig) -> Vec<Finding> {
    let (Some(subject), RuleParam::Length(min)) = (&message.subject, &rule.param) else {
        return Vec::new();
    };
    vec![min_length(char_len(subject), *min, "subject", rule).at(1)]
}

fn check_body_empty(message: &CommitMessage, rule: &RuleConfig) -> Vec<Finding> {
    let finding = Finding::new(message.body.is_none(), "be empty");
    if rule.applicability == Applicability::Never {
        vec![finding.hint("Add a body with more details about the change")]
    } else {
        vec![finding]
    }
}

fn check_body_leading_blank(message: &CommitMessage, _rule: &RuleConfig) -> Vec<Finding> {
    if message.body.is_none() {
        return Vec::new();
    }
    vec![Finding::new(is_blank(message.line(2)), "have a leading blank line")
        .at(2)
        .hint("Separate the body from the header with an empty line")]
}

fn check_body_max_line_length(message: &CommitMessage, rule: &RuleConfig) -> Vec<Finding> {
    let RuleParam::Length(max) = rule.param else {
        return Vec::new();
    };
    message
        .body_lines()
        .into_iter()
        .map(|(number, line)| max_length(char_len(line), max, "line", rule).at(number))
        .collect()
}

fn check_footer_empty(message: &CommitMessage, _rule: &RuleConfig) -> Vec<Finding> {
    vec![Finding::new(message.footer.is_none(), "be empty")]
}

fn check_footer_leading_blank(message: &CommitMessage, _rule: &RuleConfig) -> Vec<Finding> {
    let Some(footer_line) = message.footer_line else {
        return Vec::new();
    };
    vec![Finding::new(
        is_blank(message.line(footer_line - 1)),
        "have a leading blank line",
    )
    .at(footer_line)
    .hint("Separate the footer from the body with an empty line")]
}

fn check_footer_max_line_length(message: &CommitMessage, rule: &RuleConfig) -> Vec<Finding> {
    let RuleParam::Length(max) = rule.param else {
        return Vec::new();
    };
    message
        .footer_lines()
        .into_iter()
        .map(|(number, line)| max_length(char_len(line), max, "line", rule).at(number))
        .collect()
}
