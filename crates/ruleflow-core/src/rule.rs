//! The rule contract.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::Cancelled;
use crate::types::RuleOutcome;

/// A single unit of validation over a context value.
///
/// # Statelessness Contract
/// - MUST NOT hold mutable state tied to a particular run
/// - MUST NOT have observable side effects
/// - MUST check `cancel` before doing any work and return [`Cancelled`]
///   if it has been triggered
///
/// Rules may suspend (e.g. await an external lookup); the pipeline never runs
/// two rules of the same run concurrently.
#[async_trait]
pub trait Rule<C: ?Sized + Sync>: Send + Sync {
    /// Name used in logs. Defaults to the implementing type's name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Evaluate this rule against `context`.
    async fn evaluate(
        &self,
        context: &C,
        cancel: &CancellationToken,
    ) -> Result<RuleOutcome, Cancelled>;
}

/// Return [`Cancelled`] if `cancel` has been triggered.
///
/// Rules call this first thing in [`Rule::evaluate`].
pub fn check_cancelled(cancel: &CancellationToken) -> Result<(), Cancelled> {
    if cancel.is_cancelled() {
        Err(Cancelled)
    } else {
        Ok(())
    }
}

#[async_trait]
impl<C, R> Rule<C> for Arc<R>
where
    C: ?Sized + Sync,
    R: Rule<C> + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn evaluate(
        &self,
        context: &C,
        cancel: &CancellationToken,
    ) -> Result<RuleOutcome, Cancelled> {
        (**self).evaluate(context, cancel).await
    }
}
