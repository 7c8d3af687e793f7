//! Rule-set configuration loaded from YAML or JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a rule set.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read rule set file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Rule set validation failed: {0}")]
    ValidationError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// One rule entry, tagged by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleSpec {
    /// The field must be present
    NotNull { field: String },

    /// The field must have at least `min` characters
    MinLength {
        field: String,
        min: usize,
        #[serde(default = "default_trim")]
        trim: bool,
    },

    /// The field must match `pattern`
    Pattern {
        field: String,
        pattern: String,
        #[serde(default)]
        code: Option<String>,
    },

    /// The field must look like an email address
    Email { field: String },
}

fn default_trim() -> bool {
    true
}

impl RuleSpec {
    /// Name of the registration field this rule reads.
    pub fn field(&self) -> &str {
        match self {
            RuleSpec::NotNull { field }
            | RuleSpec::MinLength { field, .. }
            | RuleSpec::Pattern { field, .. }
            | RuleSpec::Email { field } => field,
        }
    }
}

/// An ordered list of rules to assemble into a pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleSetConfig {
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

impl Default for RuleSetConfig {
    /// Email and password required, password at least 8 characters.
    fn default() -> Self {
        Self {
            rules: vec![
                RuleSpec::NotNull {
                    field: "email".to_string(),
                },
                RuleSpec::NotNull {
                    field: "password".to_string(),
                },
                RuleSpec::MinLength {
                    field: "password".to_string(),
                    min: 8,
                    trim: true,
                },
            ],
        }
    }
}

impl RuleSetConfig {
    /// Parse a rule set from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: RuleSetConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a rule set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RuleSetConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a rule set, picking the format from the file extension.
    ///
    /// `.json` is parsed as JSON; anything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        if is_json(path) {
            Self::from_json(&contents)
        } else {
            Self::from_yaml(&contents)
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.field().trim().is_empty() {
                return Err(ConfigError::MissingField(format!("rules[{}].field", index)));
            }

            if let RuleSpec::Pattern { pattern, .. } = rule {
                if pattern.is_empty() {
                    return Err(ConfigError::ValidationError(format!(
                        "rules[{}].pattern must not be empty",
                        index
                    )));
                }
            }
        }

        Ok(())
    }
}

pub(crate) fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const RULES_YAML: &str = r#"
rules:
  - kind: not_null
    field: email
  - kind: min_length
    field: password
    min: 12
  - kind: min_length
    field: password
    min: 4
    trim: false
  - kind: pattern
    field: email
    pattern: "^[^@]+@[^@]+$"
    code: EMAIL
"#;

    #[test]
    fn test_parse_yaml_rule_set() {
        let config = RuleSetConfig::from_yaml(RULES_YAML).unwrap();

        assert_eq!(config.rules.len(), 4);
        assert_eq!(
            config.rules[1],
            RuleSpec::MinLength {
                field: "password".to_string(),
                min: 12,
                trim: true,
            }
        );
        assert!(matches!(config.rules[2], RuleSpec::MinLength { trim: false, .. }));
        assert!(matches!(
            &config.rules[3],
            RuleSpec::Pattern { code: Some(code), .. } if code == "EMAIL"
        ));
    }

    #[test]
    fn test_parse_json_rule_set() {
        let json = r#"{"rules": [{"kind": "email", "field": "email"}]}"#;
        let config = RuleSetConfig::from_json(json).unwrap();

        assert_eq!(
            config.rules,
            vec![RuleSpec::Email {
                field: "email".to_string()
            }]
        );
    }

    #[test]
    fn test_empty_rule_set_is_allowed() {
        let config = RuleSetConfig::from_yaml("rules: []").unwrap();
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_blank_field_rejected() {
        let yaml = r#"
rules:
  - kind: not_null
    field: "  "
"#;
        assert!(matches!(
            RuleSetConfig::from_yaml(yaml),
            Err(ConfigError::MissingField(_))
        ));
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let yaml = r#"
rules:
  - kind: pattern
    field: email
    pattern: ""
"#;
        assert!(matches!(
            RuleSetConfig::from_yaml(yaml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let yaml = r#"
rules:
  - kind: max_length
    field: email
"#;
        assert!(matches!(
            RuleSetConfig::from_yaml(yaml),
            Err(ConfigError::YamlError(_))
        ));
    }

    #[test]
    fn test_from_file_picks_format_by_extension() {
        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(json, r#"{{"rules": [{{"kind": "not_null", "field": "email"}}]}}"#).unwrap();
        let config = RuleSetConfig::from_file(json.path()).unwrap();
        assert_eq!(config.rules.len(), 1);

        let mut yaml = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(yaml, "{}", RULES_YAML).unwrap();
        let config = RuleSetConfig::from_file(yaml.path()).unwrap();
        assert_eq!(config.rules.len(), 4);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            RuleSetConfig::from_file("/nonexistent/rules.yaml"),
            Err(ConfigError::IoError(_))
        ));
    }

    #[test]
    fn test_default_rule_set() {
        let config = RuleSetConfig::default();
        let fields: Vec<&str> = config.rules.iter().map(RuleSpec::field).collect();
        assert_eq!(fields, vec!["email", "password", "password"]);
    }
}
