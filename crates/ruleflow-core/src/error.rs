//! Error types for pipeline construction and execution.
//!
//! Validation failures are never reported here: they travel as
//! [`RuleError`](crate::RuleError) data inside a returned result. The types in
//! this module cover the two control channels:
//! - [`BuildError`]: a programmer fault while wiring a pipeline
//! - [`Cancelled`]: a run was aborted through its cancellation token

use thiserror::Error;

/// Invalid-argument faults raised by [`PipelineBuilder`](crate::PipelineBuilder).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Invalid argument: rule must not be absent")]
    MissingRule,

    #[error("Invalid argument: rule set must not be absent")]
    MissingRuleSet,

    #[error("Invalid argument: rule set contains an absent element at index {index}")]
    MissingRuleInSet { index: usize },
}

/// Raised when a rule or pipeline observes a cancelled token.
///
/// No partial result accompanies it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[error("Evaluation cancelled")]
pub struct Cancelled;

/// Errors from constructing one of the bundled rules.
#[derive(Error, Debug)]
pub enum RuleConfigError {
    #[error("Invalid pattern for field {field}: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },
}
