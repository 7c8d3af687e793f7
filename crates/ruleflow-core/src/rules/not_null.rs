//! Presence check for an optional field.

use std::marker::PhantomData;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::Cancelled;
use crate::rule::{check_cancelled, Rule};
use crate::types::{codes, RuleError, RuleOutcome};

/// Fails with code `NULL` when the selected field is absent.
pub struct NotNullRule<C: ?Sized, T: ?Sized, F> {
    field_name: String,
    selector: F,
    _marker: PhantomData<fn(&C) -> Option<&T>>,
}

impl<C: ?Sized, T: ?Sized, F> NotNullRule<C, T, F> {
    pub fn new(field_name: impl Into<String>, selector: F) -> Self
    where
        F: Fn(&C) -> Option<&T>,
    {
        Self {
            field_name: field_name.into(),
            selector,
            _marker: PhantomData,
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }
}

#[async_trait]
impl<C, T, F> Rule<C> for NotNullRule<C, T, F>
where
    C: ?Sized + Sync,
    T: ?Sized,
    F: Fn(&C) -> Option<&T> + Send + Sync,
{
    fn name(&self) -> &str {
        "not_null"
    }

    async fn evaluate(
        &self,
        context: &C,
        cancel: &CancellationToken,
    ) -> Result<RuleOutcome, Cancelled> {
        check_cancelled(cancel)?;

        if (self.selector)(context).is_some() {
            return Ok(RuleOutcome::success());
        }

        Ok(RuleOutcome::fail(RuleError::new(
            codes::NULL,
            format!("{} must not be null.", self.field_name),
        )))
    }
}
