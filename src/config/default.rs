// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in presets and default configuration values.

use std::collections::BTreeMap;

use crate::rules::{
    Applicability, Case, RawEntry, RawValue, RuleConfig, RuleParam, RuleSet, Severity,
};

use super::schema::{ClintConfig, CommitType};

/// Name of the conventional-commits base preset.
pub const CONVENTIONAL_PRESET: &str = "@commitlint/config-conventional";

/// Short alias accepted for [`CONVENTIONAL_PRESET`].
const CONVENTIONAL_ALIAS: &str = "conventional";

/// Look up a built-in preset by name.
pub fn preset(name: &str) -> Option<RuleSet> {
    match name {
        CONVENTIONAL_PRESET | CONVENTIONAL_ALIAS => Some(conventional_rules()),
        _ => None,
    }
}

/// The conventional-commits base rule set.
pub fn conventional_rules() -> RuleSet {
    use Applicability::{Always, Never};
    use Severity::{Error, Warning};

    let rules = [
        ("body-leading-blank", Warning, Always, RuleParam::None),
        ("body-max-line-length", Error, Always, RuleParam::Length(100)),
        ("footer-leading-blank", Warning, Always, RuleParam::None),
        ("footer-max-line-length", Error, Always, RuleParam::Length(100)),
        ("header-max-length", Error, Always, RuleParam::Length(100)),
        ("header-trim", Error, Always, RuleParam::None),
        (
            "subject-case",
            Error,
            Never,
            RuleParam::Cases(vec![
                Case::SentenceCase,
                Case::StartCase,
                Case::PascalCase,
                Case::UpperCase,
            ]),
        ),
        ("subject-empty", Error, Never, RuleParam::None),
        ("subject-full-stop", Error, Never, RuleParam::Text(".".to_string())),
        ("type-case", Error, Always, RuleParam::Cases(vec![Case::LowerCase])),
        ("type-empty", Error, Never, RuleParam::None),
        ("type-enum", Error, Always, RuleParam::Values(CommitType::tags())),
    ];

    rules
        .into_iter()
        .map(|(name, severity, applicability, param)| {
            (name.to_string(), RuleConfig::new(severity, applicability, param))
        })
        .collect()
}

fn entry(level: i64, applicability: &str, param: Option<RawValue>) -> RawEntry {
    let mut entry = vec![
        RawValue::Int(level),
        RawValue::Text(applicability.to_string()),
    ];
    entry.extend(param);
    entry
}

fn text(value: &str) -> Option<RawValue> {
    Some(RawValue::Text(value.to_string()))
}

/// The project's rule overrides on top of the conventional preset.
pub fn project_rules() -> BTreeMap<String, RawEntry> {
    let rules = [
        ("subject-empty", entry(2, "never", None)),
        ("subject-full-stop", entry(2, "never", text("."))),
        ("subject-max-length", entry(2, "always", Some(RawValue::Int(72)))),
        ("subject-case", entry(2, "always", text("lower-case"))),
        ("type-empty", entry(2, "never", None)),
        ("type-case", entry(2, "always", text("lower-case"))),
        (
            "type-enum",
            entry(2, "always", Some(RawValue::List(CommitType::tags()))),
        ),
        ("scope-case", entry(2, "always", text("lower-case"))),
        ("body-max-line-length", entry(1, "always", Some(RawValue::Int(100)))),
        ("footer-max-line-length", entry(1, "always", Some(RawValue::Int(100)))),
    ];

    rules
        .into_iter()
        .map(|(name, entry)| (name.to_string(), entry))
        .collect()
}

/// Get the default configuration: the conventional preset plus the
/// project's overrides.
pub fn default_config() -> ClintConfig {
    ClintConfig {
        extends: vec![CONVENTIONAL_PRESET.to_string()],
        rules: project_rules(),
        base_dir: None,
    }
}

/// Generate an example configuration file.
pub fn example_config() -> String {
    let types = CommitType::all()
        .iter()
        .map(|t| format!("    \"{}\", # {}\n", t.as_str(), t.description()))
        .collect::<String>();

    format!(
        r#"# clint configuration

extends = ["{preset}"]

[rules]
# Ensure the subject is not empty
"subject-empty" = [2, "never"]
# Ensure the subject doesn't end with a period
"subject-full-stop" = [2, "never", "."]
# Ensure the subject is not too long
"subject-max-length" = [2, "always", 72]
# Ensure the subject starts with lowercase
"subject-case" = [2, "always", "lower-case"]
# Ensure the type is not empty
"type-empty" = [2, "never"]
# Ensure the type is lowercase
"type-case" = [2, "always", "lower-case"]
# Allowed types
"type-enum" = [2, "always", [
{types}]]
# Optional scope format
"scope-case" = [2, "always", "lower-case"]
# Body line length
"body-max-line-length" = [1, "always", 100]
# Footer line length
"footer-max-line-length" = [1, "always", 100]
"#,
        preset = CONVENTIONAL_PRESET,
        types = types,
    )
}

/// A configuration that only extends the conventional preset.
pub fn conventional_config() -> String {
    format!("# clint configuration\n\nextends = [\"{}\"]\n", CONVENTIONAL_PRESET)
}

/// A configuration with the core header rules and no preset.
pub fn minimal_config() -> &'static str {
    r#"# clint configuration (minimal)

[rules]
"type-empty" = [2, "never"]
"subject-empty" = [2, "never"]
"header-max-length" = [2, "always", 72]
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conventional_preset() {
        let rules = preset(CONVENTIONAL_PRESET).unwrap();
        assert_eq!(rules.len(), 12);
        assert_eq!(
            rules.get("header-max-length").map(|r| &r.param),
            Some(&RuleParam::Length(100))
        );
        assert_eq!(preset("conventional"), Some(rules));
        assert!(preset("@commitlint/config-angular").is_none());
    }

    #[test]
    fn test_project_rules_are_well_formed() {
        let rules = RuleSet::from_entries(&project_rules()).unwrap();
        assert_eq!(rules.len(), 10);
        assert_eq!(
            rules.get("subject-max-length").map(|r| &r.param),
            Some(&RuleParam::Length(72))
        );
        assert_eq!(
            rules.get("body-max-line-length").map(|r| r.severity),
            Some(Severity::Warning)
        );
    }

    #[test]
    fn test_example_config_parseable() {
        let example = example_config();
        let config: ClintConfig = toml::from_str(&example).expect("Example config should parse");
        assert_eq!(config, default_config());
    }

    #[test]
    fn test_minimal_config_parseable() {
        let config: ClintConfig = toml::from_str(minimal_config()).unwrap();
        assert!(config.extends.is_empty());
        assert!(RuleSet::from_entries(&config.rules).is_ok());
    }

    #[test]
    fn test_conventional_config_parseable() {
        let config: ClintConfig = toml::from_str(&conventional_config()).unwrap();
        assert_eq!(config.extends, vec![CONVENTIONAL_PRESET]);
        assert!(config.rules.is_empty());
    }
}
