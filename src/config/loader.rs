// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading and extends-chain resolution.

use crate::error::{ClintError, ConfigError, Result};
use crate::rules::RuleSet;
use std::path::{Path, PathBuf};

use super::default::preset;
use super::schema::ClintConfig;

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["clint.toml", ".clint.toml", ".clintrc.json", ".config/clint.toml"];

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // Try parent directory
        if !current.pop() {
            break;
        }
    }

    // Also check user's home directory
    if let Some(home) = dirs::home_dir() {
        for config_name in CONFIG_FILES {
            let config_path = home.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
        let clint_config = config_dir.join("clint").join("config.toml");
        if clint_config.exists() {
            return Some(clint_config);
        }
    }

    None
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<ClintConfig> {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            Ok(ClintConfig::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<ClintConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(ClintError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ClintError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })
    })?;

    let mut config = if path.extension().is_some_and(|ext| ext == "json") {
        parse_json_config(&content)?
    } else {
        parse_config(&content)?
    };
    config.base_dir = path.parent().map(Path::to_path_buf);

    Ok(config)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<ClintConfig> {
    toml::from_str(content).map_err(|e| {
        ClintError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })
}

/// Parse configuration from a JSON string.
pub fn parse_json_config(content: &str) -> Result<ClintConfig> {
    serde_json::from_str(content).map_err(|e| {
        ClintError::Config(ConfigError::ParseError {
            message: format!("Failed to parse JSON: {}", e),
        })
    })
}

/// Resolve a configuration's extends chain and overrides into one table.
pub fn resolve_rules(config: &ClintConfig) -> Result<RuleSet> {
    let mut chain = Vec::new();
    resolve_layers(config, &mut chain)
}

/// `chain` holds the files currently being resolved, to detect cycles.
fn resolve_layers(config: &ClintConfig, chain: &mut Vec<PathBuf>) -> Result<RuleSet> {
    let bases = config
        .extends
        .iter()
        .map(|name| resolve_extend(name, config.base_dir.as_deref(), chain))
        .collect::<Result<Vec<_>>>()?;

    let overrides = RuleSet::from_entries(&config.rules)?;

    Ok(RuleSet::resolve(&bases, &overrides))
}

fn resolve_extend(
    name: &str,
    base_dir: Option<&Path>,
    chain: &mut Vec<PathBuf>,
) -> Result<RuleSet> {
    if let Some(rules) = preset(name) {
        tracing::debug!("Extending preset {}", name);
        return Ok(rules);
    }

    if !looks_like_path(name) {
        return Err(ClintError::Config(ConfigError::UnknownPreset {
            name: name.to_string(),
        }));
    }

    let path = match base_dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    };
    let key = path.canonicalize().unwrap_or_else(|_| path.clone());

    if chain.contains(&key) {
        return Err(ClintError::Config(ConfigError::CyclicExtends { path: key }));
    }

    tracing::debug!("Extending configuration file {:?}", path);
    let config = load_config_from(&path)?;

    chain.push(key);
    let rules = resolve_layers(&config, chain);
    chain.pop();

    rules
}

fn looks_like_path(name: &str) -> bool {
    name.starts_with('.')
        || name.starts_with('/')
        || name.ends_with(".toml")
        || name.ends_with(".json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{RuleParam, Severity};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_config("").unwrap();
        assert!(config.extends.is_empty());
        assert!(config.rules.is_empty());
        assert!(resolve_rules(&config).unwrap().is_empty());
    }

    #[test]
    fn test_parse_custom_config() {
        let toml = r#"
extends = ["@commitlint/config-conventional"]

[rules]
"subject-max-length" = [2, "always", 50]
"scope-enum" = [2, "always", ["api", "cli"]]
"#;
        let config = parse_config(toml).unwrap();
        let rules = resolve_rules(&config).unwrap();
        assert_eq!(
            rules.get("subject-max-length").map(|r| &r.param),
            Some(&RuleParam::Length(50))
        );
        assert!(rules.get("type-enum").is_some());
        assert!(rules.get("scope-enum").is_some());
    }

    #[test]
    fn test_parse_json_config() {
        let json = r#"{
            "extends": ["conventional"],
            "rules": { "body-max-line-length": [1, "always", 120] }
        }"#;
        let config = parse_json_config(json).unwrap();
        let rules = resolve_rules(&config).unwrap();
        let body = rules.get("body-max-line-length").unwrap();
        assert_eq!(body.severity, Severity::Warning);
        assert_eq!(body.param, RuleParam::Length(120));
    }

    #[test]
    fn test_shape_error_is_fatal() {
        let config = parse_config(r#"rules = { "subject-empty" = [5, "never"] }"#).unwrap();
        let err = resolve_rules(&config).unwrap_err();
        assert!(matches!(err, ClintError::Config(ConfigError::Shape { .. })));
    }

    #[test]
    fn test_wrongly_typed_value_is_a_shape_error() {
        let config = parse_config(
            r#"
[rules]
"header-max-length" = [2, "always", 2.5]
"#,
        )
        .unwrap();
        let err = resolve_rules(&config).unwrap_err();
        assert!(err.to_string().contains("header-max-length"));
        assert!(matches!(err, ClintError::Config(ConfigError::Shape { .. })));
    }

    #[test]
    fn test_unknown_preset() {
        let config = parse_config(r#"extends = ["@commitlint/config-angular"]"#).unwrap();
        let err = resolve_rules(&config).unwrap_err();
        assert!(matches!(
            err,
            ClintError::Config(ConfigError::UnknownPreset { .. })
        ));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let config = ClintConfig::default();
        let first = serde_json::to_string(&resolve_rules(&config).unwrap()).unwrap();
        let second = serde_json::to_string(&resolve_rules(&config).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_resolution() {
        let rules = resolve_rules(&ClintConfig::default()).unwrap();
        // conventional preset plus scope-case and subject-max-length
        assert_eq!(rules.len(), 14);
        assert_eq!(
            rules.get("body-max-line-length").map(|r| r.severity),
            Some(Severity::Warning)
        );
        assert_eq!(
            rules.get("header-max-length").map(|r| r.severity),
            Some(Severity::Error)
        );
    }

    #[test]
    fn test_extends_file_relative_to_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("base.toml"),
            r#"
extends = ["conventional"]

[rules]
"header-max-length" = [2, "always", 80]
"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("clint.toml"),
            r#"
extends = ["./base.toml"]

[rules]
"scope-empty" = [1, "never"]
"#,
        )
        .unwrap();

        let config = load_config_from(&dir.path().join("clint.toml")).unwrap();
        let rules = resolve_rules(&config).unwrap();
        assert_eq!(
            rules.get("header-max-length").map(|r| &r.param),
            Some(&RuleParam::Length(80))
        );
        assert!(rules.get("type-enum").is_some());
        assert!(rules.get("scope-empty").is_some());
    }

    #[test]
    fn test_cyclic_extends() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.toml"), r#"extends = ["./b.toml"]"#).unwrap();
        fs::write(dir.path().join("b.toml"), r#"extends = ["./a.toml"]"#).unwrap();

        let config = load_config_from(&dir.path().join("a.toml")).unwrap();
        let err = resolve_rules(&config).unwrap_err();
        assert!(matches!(
            err,
            ClintError::Config(ConfigError::CyclicExtends { .. })
        ));
    }

    #[test]
    fn test_missing_config_file() {
        let err = load_config_from(Path::new("/definitely/not/here/clint.toml")).unwrap_err();
        assert!(matches!(err, ClintError::Config(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_find_config_file_walks_up() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(".clint.toml"), "").unwrap();

        let found = find_config_file_from(&nested).unwrap();
        assert_eq!(found, dir.path().join(".clint.toml"));
    }
}
