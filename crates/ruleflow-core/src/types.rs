//! Result types produced by rules and pipelines.

use serde::Serialize;

/// Well-known error codes used by the bundled rules.
pub mod codes {
    /// A required field was absent.
    pub const NULL: &str = "NULL";

    /// A string field was shorter than its configured minimum.
    pub const MINLEN: &str = "MINLEN";

    /// A string field did not match its configured pattern.
    pub const PATTERN: &str = "PATTERN";
}

/// A single validation failure: a machine-readable code and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RuleError {
    code: String,
    message: String,
}

impl RuleError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Outcome of evaluating one rule.
///
/// `is_success()` holds exactly when `errors()` is empty; the constructors
/// derive one from the other so the two cannot disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    success: bool,
    errors: Vec<RuleError>,
}

impl RuleOutcome {
    /// A passing outcome with no errors.
    pub fn success() -> Self {
        Self {
            success: true,
            errors: Vec::new(),
        }
    }

    /// A failing outcome carrying a single error.
    pub fn fail(error: RuleError) -> Self {
        Self {
            success: false,
            errors: vec![error],
        }
    }

    /// Build an outcome from any number of errors. An empty list is a success.
    pub fn from_errors(errors: impl IntoIterator<Item = RuleError>) -> Self {
        let errors: Vec<RuleError> = errors.into_iter().collect();
        Self {
            success: errors.is_empty(),
            errors,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn errors(&self) -> &[RuleError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<RuleError> {
        self.errors
    }
}

/// Aggregated outcome of a whole pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineResult {
    success: bool,
    errors: Vec<RuleError>,
}

impl PipelineResult {
    /// Fold rule outcomes, in order, into one result.
    ///
    /// Errors are concatenated in outcome order with each outcome's own
    /// errors kept in place. No outcomes means success.
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = RuleOutcome>) -> Self {
        let errors: Vec<RuleError> = outcomes
            .into_iter()
            .filter(|o| !o.is_success())
            .flat_map(RuleOutcome::into_errors)
            .collect();

        Self {
            success: errors.is_empty(),
            errors,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn errors(&self) -> &[RuleError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<RuleError> {
        self.errors
    }
}

impl FromIterator<RuleOutcome> for PipelineResult {
    fn from_iter<I: IntoIterator<Item = RuleOutcome>>(iter: I) -> Self {
        Self::from_outcomes(iter)
    }
}

impl From<PipelineResult> for RuleOutcome {
    fn from(result: PipelineResult) -> Self {
        RuleOutcome::from_errors(result.errors)
    }
}
