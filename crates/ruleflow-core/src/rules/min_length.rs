//! Minimum length check for a string field.

use std::marker::PhantomData;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::Cancelled;
use crate::rule::{check_cancelled, Rule};
use crate::types::{codes, RuleError, RuleOutcome};

/// Fails with code `MINLEN` when the selected string is shorter than `min_length`.
///
/// Length is counted in characters. Surrounding whitespace is trimmed before
/// measuring unless disabled with [`trim_whitespace(false)`](Self::trim_whitespace).
/// A missing value measures as 0.
pub struct MinLengthRule<C: ?Sized, F> {
    field_name: String,
    min_length: usize,
    trim_whitespace: bool,
    selector: F,
    _marker: PhantomData<fn(&C)>,
}

impl<C: ?Sized, F> MinLengthRule<C, F> {
    pub fn new(field_name: impl Into<String>, min_length: usize, selector: F) -> Self
    where
        F: Fn(&C) -> Option<&str>,
    {
        Self {
            field_name: field_name.into(),
            min_length,
            trim_whitespace: true,
            selector,
            _marker: PhantomData,
        }
    }

    /// Whether to trim surrounding whitespace before measuring. Defaults to `true`.
    pub fn trim_whitespace(mut self, trim: bool) -> Self {
        self.trim_whitespace = trim;
        self
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    fn measure(&self, value: Option<&str>) -> usize {
        match value {
            None => 0,
            Some(value) if self.trim_whitespace => value.trim().chars().count(),
            Some(value) => value.chars().count(),
        }
    }
}

#[async_trait]
impl<C, F> Rule<C> for MinLengthRule<C, F>
where
    C: ?Sized + Sync,
    F: Fn(&C) -> Option<&str> + Send + Sync,
{
    fn name(&self) -> &str {
        "min_length"
    }

    async fn evaluate(
        &self,
        context: &C,
        cancel: &CancellationToken,
    ) -> Result<RuleOutcome, Cancelled> {
        check_cancelled(cancel)?;

        let measured = self.measure((self.selector)(context));
        if measured < self.min_length {
            return Ok(RuleOutcome::fail(RuleError::new(
                codes::MINLEN,
                format!(
                    "{} must be at least {} characters long.",
                    self.field_name, self.min_length
                ),
            )));
        }

        Ok(RuleOutcome::success())
    }
}
