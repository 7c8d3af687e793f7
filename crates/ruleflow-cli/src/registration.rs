//! The registration record validated by the demo, and the rules over it.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use ruleflow_core::{
    BuildError, MinLengthRule, NotNullRule, PatternRule, Pipeline, PipelineBuilder,
    RuleConfigError, SharedRule,
};

use crate::config::{is_json, ConfigError, RuleSpec, RuleSetConfig};

lazy_static! {
    /// Email address pattern (RFC 5322 simplified)
    pub static ref EMAIL_PATTERN: Regex = Regex::new(
        r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"
    ).unwrap();
}

/// A user registration form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Registration {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Registration {
    /// Load a registration from a YAML or JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        if is_json(path) {
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(serde_yaml::from_str(&contents)?)
        }
    }
}

/// A field of [`Registration`] that rules can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
}

impl Field {
    /// Resolve a configured field name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "email" => Some(Field::Email),
            "password" => Some(Field::Password),
            _ => None,
        }
    }

    /// Name used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            Field::Email => "Email",
            Field::Password => "Password",
        }
    }

    pub fn select(self, registration: &Registration) -> Option<&str> {
        match self {
            Field::Email => registration.email.as_deref(),
            Field::Password => registration.password.as_deref(),
        }
    }
}

fn selector(field: Field) -> impl Fn(&Registration) -> Option<&str> + Copy + Send + Sync {
    move |registration| field.select(registration)
}

/// Errors from turning a rule set into a pipeline.
#[derive(thiserror::Error, Debug)]
pub enum AssembleError {
    #[error(transparent)]
    Rule(#[from] RuleConfigError),

    #[error("Unknown field {field:?} in rule set: {source}")]
    UnknownField {
        field: String,
        #[source]
        source: BuildError,
    },
}

/// Build the rule a configured entry describes.
///
/// Returns `Ok(None)` when the entry names a field the registration does not have.
pub fn resolve(spec: &RuleSpec) -> Result<Option<SharedRule<Registration>>, RuleConfigError> {
    let Some(field) = Field::parse(spec.field()) else {
        tracing::debug!(field = spec.field(), "Rule references unknown field");
        return Ok(None);
    };

    let select = selector(field);

    let rule: SharedRule<Registration> = match spec {
        RuleSpec::NotNull { .. } => Arc::new(NotNullRule::new(field.label(), select)),
        RuleSpec::MinLength { min, trim, .. } => {
            Arc::new(MinLengthRule::new(field.label(), *min, select).trim_whitespace(*trim))
        }
        RuleSpec::Pattern { pattern, code, .. } => {
            let rule = PatternRule::new(field.label(), pattern, select)?;
            match code {
                Some(code) => Arc::new(rule.with_code(code.clone())),
                None => Arc::new(rule),
            }
        }
        RuleSpec::Email { .. } => Arc::new(
            PatternRule::with_regex(field.label(), EMAIL_PATTERN.clone(), select)
                .with_code("EMAIL"),
        ),
    };

    Ok(Some(rule))
}

/// Assemble a registration pipeline from a rule set.
pub fn assemble(config: &RuleSetConfig) -> Result<Pipeline<Registration>, AssembleError> {
    let rules = config
        .rules
        .iter()
        .map(resolve)
        .collect::<Result<Vec<_>, _>>()?;

    let mut builder = PipelineBuilder::new();
    let added = builder.try_add_rules(Some(rules)).map(|_| ());
    match added {
        Ok(()) => Ok(builder.build()),
        Err(source @ BuildError::MissingRuleInSet { index }) => Err(AssembleError::UnknownField {
            field: config.rules[index].field().to_string(),
            source,
        }),
        Err(other) => unreachable!("rule set was passed as Some: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(email: Option<&str>, password: Option<&str>) -> Registration {
        Registration {
            email: email.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    fn codes(result: &ruleflow_core::PipelineResult) -> Vec<&str> {
        result.errors().iter().map(|e| e.code()).collect()
    }

    #[test]
    fn test_field_parse() {
        assert_eq!(Field::parse("Email"), Some(Field::Email));
        assert_eq!(Field::parse(" password "), Some(Field::Password));
        assert_eq!(Field::parse("username"), None);
    }

    #[test]
    fn test_email_pattern() {
        assert!(EMAIL_PATTERN.is_match("example@example.com"));
        assert!(!EMAIL_PATTERN.is_match("example@"));
    }

    #[tokio::test]
    async fn test_default_rule_set_scenario() {
        let pipeline = assemble(&RuleSetConfig::default()).unwrap();
        let result = pipeline
            .run_to_completion(&registration(None, Some("short")))
            .await
            .unwrap();

        assert!(!result.is_success());
        assert_eq!(codes(&result), vec!["NULL", "MINLEN"]);
        assert_eq!(result.errors()[0].message(), "Email must not be null.");
        assert_eq!(
            result.errors()[1].message(),
            "Password must be at least 8 characters long."
        );
    }

    #[tokio::test]
    async fn test_configured_rules() {
        let config = RuleSetConfig::from_yaml(
            r#"
rules:
  - kind: email
    field: email
  - kind: min_length
    field: password
    min: 12
    trim: false
  - kind: pattern
    field: password
    pattern: "[0-9]"
    code: DIGIT
"#,
        )
        .unwrap();
        let pipeline = assemble(&config).unwrap();

        let result = pipeline
            .run_to_completion(&registration(Some("nope"), Some("  letters   ")))
            .await
            .unwrap();
        assert_eq!(codes(&result), vec!["EMAIL", "DIGIT"]);

        let result = pipeline
            .run_to_completion(&registration(Some("a@b.io"), Some("abcdefghijk1")))
            .await
            .unwrap();
        assert!(result.is_success());
    }

    #[test]
    fn test_unknown_field_rejects_rule_set() {
        let config = RuleSetConfig::from_yaml(
            r#"
rules:
  - kind: not_null
    field: email
  - kind: not_null
    field: username
"#,
        )
        .unwrap();

        match assemble(&config) {
            Err(AssembleError::UnknownField { field, source }) => {
                assert_eq!(field, "username");
                assert_eq!(source, BuildError::MissingRuleInSet { index: 1 });
            }
            other => panic!("expected unknown field error, got {:?}", other.map(|p| p.len())),
        }
    }

    #[test]
    fn test_invalid_pattern_surfaces() {
        let spec = RuleSpec::Pattern {
            field: "email".to_string(),
            pattern: "([".to_string(),
            code: None,
        };
        assert!(resolve(&spec).is_err());
    }

    #[test]
    fn test_registration_from_file() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "email: jane@example.com").unwrap();
        let loaded = Registration::from_file(file.path()).unwrap();

        assert_eq!(loaded, registration(Some("jane@example.com"), None));
    }
}
