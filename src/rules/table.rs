// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The resolved rule table.
//!
//! Configuration files describe every rule as a loose tuple
//! `[severity, applicability, parameter?]`. This module turns those tuples
//! into typed [`RuleConfig`] values, rejecting malformed shapes at load time,
//! and flattens the extends chain into a single [`RuleSet`].

use crate::error::ConfigError;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use super::builtin;
use super::case::Case;

/// One element of a raw rule tuple, as written in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Int(i64),
    Text(String),
    List(Vec<String>),
    /// Any other value; always rejected as a shape error.
    Other(serde_json::Value),
}

impl RawValue {
    fn describe(&self) -> &'static str {
        match self {
            RawValue::Int(_) => "an integer",
            RawValue::Text(_) => "a string",
            RawValue::List(_) => "a list",
            RawValue::Other(serde_json::Value::Bool(_)) => "a boolean",
            RawValue::Other(serde_json::Value::Number(_)) => "a non-integer number",
            RawValue::Other(serde_json::Value::Array(_)) => "a list of non-strings",
            RawValue::Other(serde_json::Value::Object(_)) => "a table",
            RawValue::Other(_) => "a null value",
        }
    }
}

/// A raw rule tuple.
pub type RawEntry = Vec<RawValue>;

/// Rule severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Level 0: the rule is never evaluated.
    Disabled,
    /// Level 1: reported, does not fail the check.
    Warning,
    /// Level 2: reported and fails the check.
    Error,
}

impl Severity {
    /// Convert a numeric level into a severity.
    pub fn from_level(level: i64) -> Option<Self> {
        match level {
            0 => Some(Severity::Disabled),
            1 => Some(Severity::Warning),
            2 => Some(Severity::Error),
            _ => None,
        }
    }

    /// Get the numeric level.
    pub fn level(&self) -> u8 {
        match self {
            Severity::Disabled => 0,
            Severity::Warning => 1,
            Severity::Error => 2,
        }
    }

    /// Get the string representation of the severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Disabled => "disabled",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a rule's condition is required or forbidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Applicability {
    /// Fails when the rule's predicate does not hold.
    Always,
    /// Fails when the rule's predicate holds.
    Never,
}

impl Applicability {
    /// Get the string representation of the applicability.
    pub fn as_str(&self) -> &'static str {
        match self {
            Applicability::Always => "always",
            Applicability::Never => "never",
        }
    }

    /// Whether a predicate outcome is a failure under this mode.
    pub fn fails(&self, holds: bool) -> bool {
        match self {
            Applicability::Always => !holds,
            Applicability::Never => holds,
        }
    }
}

impl std::str::FromStr for Applicability {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Applicability::Always),
            "never" => Ok(Applicability::Never),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Applicability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The shape of parameter a rule expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// No parameter.
    None,
    /// A literal string.
    Text,
    /// A length in code points.
    Length,
    /// One case name or a list of case names.
    Cases,
    /// A list of allowed values.
    Values,
}

/// A typed rule parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleParam {
    None,
    Text(String),
    Length(usize),
    Cases(Vec<Case>),
    Values(Vec<String>),
}

impl RuleParam {
    fn from_raw(rule: &str, kind: ParamKind, raw: &RawValue) -> Result<Self, ConfigError> {
        match (kind, raw) {
            (ParamKind::None, other) => Err(ConfigError::shape(
                rule,
                format!("takes no parameter, found {}", other.describe()),
            )),
            (ParamKind::Text, RawValue::Text(text)) => Ok(RuleParam::Text(text.clone())),
            (ParamKind::Length, RawValue::Int(n)) => {
                usize::try_from(*n).map(RuleParam::Length).map_err(|_| {
                    ConfigError::shape(rule, format!("length must not be negative, found {}", n))
                })
            }
            (ParamKind::Cases, RawValue::Text(name)) => {
                Ok(RuleParam::Cases(vec![parse_case(rule, name)?]))
            }
            (ParamKind::Cases, RawValue::List(names)) => names
                .iter()
                .map(|name| parse_case(rule, name))
                .collect::<Result<Vec<_>, _>>()
                .map(RuleParam::Cases),
            (ParamKind::Values, RawValue::List(values)) => Ok(RuleParam::Values(values.clone())),
            (kind, other) => Err(ConfigError::shape(
                rule,
                format!("expected {}, found {}", kind_name(kind), other.describe()),
            )),
        }
    }

    fn to_raw(&self) -> Option<RawValue> {
        match self {
            RuleParam::None => None,
            RuleParam::Text(text) => Some(RawValue::Text(text.clone())),
            RuleParam::Length(n) => Some(RawValue::Int(*n as i64)),
            RuleParam::Cases(cases) if cases.len() == 1 => {
                Some(RawValue::Text(cases[0].as_str().to_string()))
            }
            RuleParam::Cases(cases) => Some(RawValue::List(
                cases.iter().map(|c| c.as_str().to_string()).collect(),
            )),
            RuleParam::Values(values) => Some(RawValue::List(values.clone())),
        }
    }
}

fn kind_name(kind: ParamKind) -> &'static str {
    match kind {
        ParamKind::None => "no parameter",
        ParamKind::Text => "a string",
        ParamKind::Length => "a non-negative integer",
        ParamKind::Cases => "a case name or a list of case names",
        ParamKind::Values => "a list of strings",
    }
}

fn parse_case(rule: &str, name: &str) -> Result<Case, ConfigError> {
    name.parse::<Case>().map_err(|_| {
        let known: Vec<&str> = Case::all().iter().map(|c| c.as_str()).collect();
        ConfigError::shape(
            rule,
            format!("unknown case '{}' (expected one of: {})", name, known.join(", ")),
        )
    })
}

/// A single resolved rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConfig {
    pub severity: Severity,
    pub applicability: Applicability,
    pub param: RuleParam,
}

impl RuleConfig {
    /// Create a rule entry.
    pub fn new(severity: Severity, applicability: Applicability, param: RuleParam) -> Self {
        Self {
            severity,
            applicability,
            param,
        }
    }

    /// Validate a raw `[severity, applicability, parameter?]` tuple.
    ///
    /// Disabled rules may omit a parameter their rule otherwise requires.
    pub fn from_raw(rule: &str, entry: &[RawValue]) -> Result<Self, ConfigError> {
        let kind = builtin::param_kind(rule).ok_or_else(|| ConfigError::UnknownRule {
            rule: rule.to_string(),
        })?;

        if !(2..=3).contains(&entry.len()) {
            return Err(ConfigError::shape(
                rule,
                format!(
                    "expected [severity, applicability, parameter?], found {} element(s)",
                    entry.len()
                ),
            ));
        }

        let severity = match &entry[0] {
            RawValue::Int(level) => Severity::from_level(*level).ok_or_else(|| {
                ConfigError::shape(rule, format!("severity must be 0, 1 or 2, found {}", level))
            })?,
            other => {
                return Err(ConfigError::shape(
                    rule,
                    format!("severity must be 0, 1 or 2, found {}", other.describe()),
                ))
            }
        };

        let applicability = match &entry[1] {
            RawValue::Text(token) => token.parse::<Applicability>().map_err(|_| {
                ConfigError::shape(
                    rule,
                    format!("applicability must be 'always' or 'never', found '{}'", token),
                )
            })?,
            other => {
                return Err(ConfigError::shape(
                    rule,
                    format!(
                        "applicability must be 'always' or 'never', found {}",
                        other.describe()
                    ),
                ))
            }
        };

        let param = match entry.get(2) {
            Some(raw) => RuleParam::from_raw(rule, kind, raw)?,
            None if kind == ParamKind::None || severity == Severity::Disabled => RuleParam::None,
            None => {
                return Err(ConfigError::shape(
                    rule,
                    format!("missing parameter, expected {}", kind_name(kind)),
                ))
            }
        };

        Ok(Self::new(severity, applicability, param))
    }

    /// Convert back to the raw tuple form.
    pub fn to_raw(&self) -> RawEntry {
        let mut entry = vec![
            RawValue::Int(self.severity.level() as i64),
            RawValue::Text(self.applicability.as_str().to_string()),
        ];
        if let Some(param) = self.param.to_raw() {
            entry.push(param);
        }
        entry
    }

    /// Whether the rule takes part in evaluation.
    pub fn is_enabled(&self) -> bool {
        self.severity != Severity::Disabled
    }
}

impl Serialize for RuleConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_raw().serialize(serializer)
    }
}

/// A mapping from rule name to rule, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: BTreeMap<String, RuleConfig>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rule set from raw configuration entries.
    pub fn from_entries(entries: &BTreeMap<String, RawEntry>) -> Result<Self, ConfigError> {
        entries
            .iter()
            .map(|(name, entry)| RuleConfig::from_raw(name, entry).map(|rule| (name.clone(), rule)))
            .collect()
    }

    /// Flatten base sets and overrides into one table.
    ///
    /// Bases apply in order and `overrides` last; a later entry replaces an
    /// earlier one with the same name as a whole.
    pub fn resolve(bases: &[RuleSet], overrides: &RuleSet) -> RuleSet {
        let mut rules = BTreeMap::new();
        for layer in bases.iter().chain(std::iter::once(overrides)) {
            for (name, rule) in &layer.rules {
                rules.insert(name.clone(), rule.clone());
            }
        }
        tracing::debug!(
            "Resolved {} rule(s) from {} base set(s)",
            rules.len(),
            bases.len()
        );
        RuleSet { rules }
    }

    /// Look up a rule by name.
    pub fn get(&self, name: &str) -> Option<&RuleConfig> {
        self.rules.get(name)
    }

    /// Iterate over all rules in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleConfig)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Iterate over the rules that are not disabled.
    pub fn enabled(&self) -> impl Iterator<Item = (&str, &RuleConfig)> {
        self.iter().filter(|(_, rule)| rule.is_enabled())
    }

    /// Number of rules in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Convert back to raw configuration entries.
    pub fn to_entries(&self) -> BTreeMap<String, RawEntry> {
        self.rules
            .iter()
            .map(|(name, rule)| (name.clone(), rule.to_raw()))
            .collect()
    }
}

impl FromIterator<(String, RuleConfig)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (String, RuleConfig)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl Serialize for RuleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rules.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(json: &str) -> RawEntry {
        serde_json::from_str(json).unwrap()
    }

    fn rule(severity: Severity, applicability: Applicability, param: RuleParam) -> RuleConfig {
        RuleConfig::new(severity, applicability, param)
    }

    #[test]
    fn test_from_raw_length() {
        let rule =
            RuleConfig::from_raw("subject-max-length", &entry(r#"[2, "always", 72]"#)).unwrap();
        assert_eq!(rule.severity, Severity::Error);
        assert_eq!(rule.applicability, Applicability::Always);
        assert_eq!(rule.param, RuleParam::Length(72));
    }

    #[test]
    fn test_from_raw_cases() {
        let rule =
            RuleConfig::from_raw("subject-case", &entry(r#"[2, "always", "lower-case"]"#))
                .unwrap();
        assert_eq!(rule.param, RuleParam::Cases(vec![Case::LowerCase]));

        let rule = RuleConfig::from_raw(
            "subject-case",
            &entry(r#"[2, "never", ["sentence-case", "upper-case"]]"#),
        )
        .unwrap();
        assert_eq!(
            rule.param,
            RuleParam::Cases(vec![Case::SentenceCase, Case::UpperCase])
        );
    }

    #[test]
    fn test_from_raw_without_param() {
        let rule = RuleConfig::from_raw("subject-empty", &entry(r#"[2, "never"]"#)).unwrap();
        assert_eq!(rule.param, RuleParam::None);
    }

    #[test]
    fn test_shape_errors() {
        let cases = [
            ("subject-empty", r#"[2]"#),
            ("subject-empty", r#"[2, "never", "x", "y"]"#),
            ("subject-empty", r#"[3, "never"]"#),
            ("subject-empty", r#"[-1, "never"]"#),
            ("subject-empty", r#"["error", "never"]"#),
            ("subject-empty", r#"[2, "sometimes"]"#),
            ("subject-empty", r#"[2, 1]"#),
            ("subject-empty", r#"[2, "never", "."]"#),
            ("subject-max-length", r#"[2, "always"]"#),
            ("subject-max-length", r#"[2, "always", "72"]"#),
            ("subject-max-length", r#"[2, "always", -5]"#),
            ("subject-case", r#"[2, "always", "shouting-case"]"#),
            ("type-enum", r#"[2, "always", "feat"]"#),
            ("subject-max-length", r#"[2, "always", true]"#),
            ("subject-max-length", r#"[2, "always", 2.5]"#),
            ("type-enum", r#"[2, "always", [["feat"]]]"#),
            ("subject-full-stop", r#"[2, "never", {"char": "."}]"#),
            ("subject-empty", r#"[true, "never"]"#),
            ("subject-empty", r#"[2, null]"#),
        ];
        for (rule, json) in cases {
            let err = RuleConfig::from_raw(rule, &entry(json)).unwrap_err();
            assert!(
                matches!(err, ConfigError::Shape { .. }),
                "{} {} gave {:?}",
                rule,
                json,
                err
            );
        }
    }

    #[test]
    fn test_wrongly_typed_param_names_the_rule() {
        let entries: BTreeMap<String, RawEntry> =
            toml::from_str(r#""subject-max-length" = [2, "always", true]"#).unwrap();
        let err = RuleSet::from_entries(&entries).unwrap_err();
        match err {
            ConfigError::Shape { rule, message } => {
                assert_eq!(rule, "subject-max-length");
                assert!(message.contains("a boolean"), "{}", message);
            }
            other => panic!("expected a shape error, got {:?}", other),
        }
    }

    #[test]
    fn test_disabled_rule_may_omit_param() {
        let rule = RuleConfig::from_raw("subject-max-length", &entry(r#"[0, "always"]"#)).unwrap();
        assert!(!rule.is_enabled());
        assert_eq!(rule.param, RuleParam::None);
    }

    #[test]
    fn test_unknown_rule() {
        let err = RuleConfig::from_raw("subject-colour", &entry(r#"[2, "always"]"#)).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownRule { .. }));
    }

    #[test]
    fn test_resolve_later_layers_replace_whole_entries() {
        let base: RuleSet = [
            (
                "subject-case".to_string(),
                rule(
                    Severity::Error,
                    Applicability::Never,
                    RuleParam::Cases(vec![Case::UpperCase]),
                ),
            ),
            (
                "header-max-length".to_string(),
                rule(Severity::Error, Applicability::Always, RuleParam::Length(100)),
            ),
        ]
        .into_iter()
        .collect();
        let middle: RuleSet = [(
            "header-max-length".to_string(),
            rule(Severity::Warning, Applicability::Always, RuleParam::Length(90)),
        )]
        .into_iter()
        .collect();
        let overrides: RuleSet = [(
            "subject-case".to_string(),
            rule(
                Severity::Error,
                Applicability::Always,
                RuleParam::Cases(vec![Case::LowerCase]),
            ),
        )]
        .into_iter()
        .collect();

        let resolved = RuleSet::resolve(&[base, middle], &overrides);
        assert_eq!(resolved.len(), 2);
        assert_eq!(
            resolved.get("subject-case"),
            Some(&rule(
                Severity::Error,
                Applicability::Always,
                RuleParam::Cases(vec![Case::LowerCase])
            ))
        );
        assert_eq!(
            resolved.get("header-max-length").map(|r| r.severity),
            Some(Severity::Warning)
        );
        assert!(resolved.get("type-enum").is_none());
    }

    #[test]
    fn test_entries_round_trip_through_raw_form() {
        let mut entries = BTreeMap::new();
        entries.insert("type-enum".to_string(), entry(r#"[2, "always", ["feat", "fix"]]"#));
        entries.insert("body-max-line-length".to_string(), entry(r#"[1, "always", 100]"#));
        let set = RuleSet::from_entries(&entries).unwrap();
        assert_eq!(set.to_entries(), entries);
    }

    #[test]
    fn test_serialize_as_tuples() {
        let set: RuleSet = [(
            "subject-full-stop".to_string(),
            rule(Severity::Error, Applicability::Never, RuleParam::Text(".".to_string())),
        )]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"subject-full-stop":[2,"never","."]}"#);
    }

    #[test]
    fn test_enabled_skips_disabled() {
        let set: RuleSet = [
            (
                "body-empty".to_string(),
                rule(Severity::Disabled, Applicability::Never, RuleParam::None),
            ),
            (
                "subject-empty".to_string(),
                rule(Severity::Error, Applicability::Never, RuleParam::None),
            ),
        ]
        .into_iter()
        .collect();
        let names: Vec<&str> = set.enabled().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["subject-empty"]);
    }
}
