//! Closure-backed rules.

use std::marker::PhantomData;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::Cancelled;
use crate::rule::{check_cancelled, Rule};
use crate::types::RuleOutcome;

/// A rule backed by a synchronous closure. See [`from_fn`].
pub struct FnRule<C: ?Sized, F> {
    name: String,
    check: F,
    _marker: PhantomData<fn(&C)>,
}

/// Wrap a synchronous check into a [`Rule`].
///
/// The cancellation token is checked before `check` runs.
///
/// ```rust,ignore
/// let adult = from_fn("adult", |age: &u32| {
///     if *age >= 18 {
///         RuleOutcome::success()
///     } else {
///         RuleOutcome::fail(RuleError::new("AGE", "Must be an adult."))
///     }
/// });
/// ```
pub fn from_fn<C, F>(name: impl Into<String>, check: F) -> FnRule<C, F>
where
    C: ?Sized,
    F: Fn(&C) -> RuleOutcome,
{
    FnRule {
        name: name.into(),
        check,
        _marker: PhantomData,
    }
}

#[async_trait]
impl<C, F> Rule<C> for FnRule<C, F>
where
    C: ?Sized + Sync,
    F: Fn(&C) -> RuleOutcome + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn evaluate(
        &self,
        context: &C,
        cancel: &CancellationToken,
    ) -> Result<RuleOutcome, Cancelled> {
        check_cancelled(cancel)?;
        Ok((self.check)(context))
    }
}
