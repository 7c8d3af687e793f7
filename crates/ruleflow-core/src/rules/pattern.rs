//! Regular-expression check for a string field.

use std::marker::PhantomData;

use async_trait::async_trait;
use regex::Regex;
use tokio_util::sync::CancellationToken;

use crate::error::{Cancelled, RuleConfigError};
use crate::rule::{check_cancelled, Rule};
use crate::types::{codes, RuleError, RuleOutcome};

/// Fails when the selected string does not match a pattern.
///
/// A missing value never matches. The error code defaults to `PATTERN`.
pub struct PatternRule<C: ?Sized, F> {
    field_name: String,
    pattern: Regex,
    code: String,
    selector: F,
    _marker: PhantomData<fn(&C)>,
}

impl<C: ?Sized, F> PatternRule<C, F> {
    /// Compile `pattern` and build the rule.
    ///
    /// # Errors
    /// [`RuleConfigError::InvalidPattern`] if `pattern` is not a valid regex.
    pub fn new(
        field_name: impl Into<String>,
        pattern: &str,
        selector: F,
    ) -> Result<Self, RuleConfigError>
    where
        F: Fn(&C) -> Option<&str>,
    {
        let field_name = field_name.into();
        let pattern = Regex::new(pattern).map_err(|source| RuleConfigError::InvalidPattern {
            field: field_name.clone(),
            source,
        })?;

        Ok(Self::with_regex(field_name, pattern, selector))
    }

    /// Build the rule from an already compiled regex.
    pub fn with_regex(field_name: impl Into<String>, pattern: Regex, selector: F) -> Self
    where
        F: Fn(&C) -> Option<&str>,
    {
        Self {
            field_name: field_name.into(),
            pattern,
            code: codes::PATTERN.to_string(),
            selector,
            _marker: PhantomData,
        }
    }

    /// Override the error code reported on mismatch.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }
}

#[async_trait]
impl<C, F> Rule<C> for PatternRule<C, F>
where
    C: ?Sized + Sync,
    F: Fn(&C) -> Option<&str> + Send + Sync,
{
    fn name(&self) -> &str {
        "pattern"
    }

    async fn evaluate(
        &self,
        context: &C,
        cancel: &CancellationToken,
    ) -> Result<RuleOutcome, Cancelled> {
        check_cancelled(cancel)?;

        let matched = (self.selector)(context).is_some_and(|value| self.pattern.is_match(value));
        if matched {
            return Ok(RuleOutcome::success());
        }

        Ok(RuleOutcome::fail(RuleError::new(
            self.code.clone(),
            format!("{} has an invalid format.", self.field_name),
        )))
    }
}
