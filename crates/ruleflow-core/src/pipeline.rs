//! Immutable, ordered rule pipelines.
//!
//! A [`Pipeline`] runs its rules one at a time, in the order they were added
//! to the [`PipelineBuilder`](crate::PipelineBuilder), and folds their
//! outcomes into a single [`PipelineResult`]:
//! 1. Before each rule is dispatched the cancellation token is checked
//! 2. Each rule's outcome is collected in order
//! 3. Outcomes are aggregated: success iff every rule succeeded, errors
//!    concatenated in rule order
//!
//! Cancellation aborts the run with [`Cancelled`]; no partial result is
//! produced.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::Cancelled;
use crate::rule::{check_cancelled, Rule};
use crate::types::{PipelineResult, RuleOutcome};

/// A frozen, ordered sequence of rules.
///
/// Holds no mutable state, so one pipeline can be shared (e.g. behind an
/// `Arc`) and run concurrently by any number of callers. Cloning is cheap and
/// shares the same rule list.
pub struct Pipeline<C: ?Sized + Sync> {
    rules: Arc<[Arc<dyn Rule<C>>]>,
}

impl<C: ?Sized + Sync> Pipeline<C> {
    pub(crate) fn from_rules(rules: Vec<Arc<dyn Rule<C>>>) -> Self {
        Self {
            rules: rules.into(),
        }
    }

    /// Read-only view of the rules, in execution order.
    pub fn rules(&self) -> &[Arc<dyn Rule<C>>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule against `context` and aggregate the outcomes.
    ///
    /// Returns [`Cancelled`] as soon as the token is observed triggered,
    /// either by the pipeline before dispatching a rule or by a rule itself.
    pub async fn run(
        &self,
        context: &C,
        cancel: &CancellationToken,
    ) -> Result<PipelineResult, Cancelled> {
        let mut outcomes = Vec::with_capacity(self.rules.len());

        for (index, rule) in self.rules.iter().enumerate() {
            if cancel.is_cancelled() {
                tracing::debug!(index, rule = rule.name(), "Run cancelled before rule dispatch");
                return Err(Cancelled);
            }

            let outcome = match rule.evaluate(context, cancel).await {
                Ok(outcome) => outcome,
                Err(cancelled) => {
                    tracing::debug!(index, rule = rule.name(), "Rule observed cancellation");
                    return Err(cancelled);
                }
            };

            tracing::debug!(
                index,
                rule = rule.name(),
                success = outcome.is_success(),
                errors = outcome.errors().len(),
                "Rule evaluated"
            );
            outcomes.push(outcome);
        }

        let result = PipelineResult::from_outcomes(outcomes);
        tracing::debug!(
            rules = self.rules.len(),
            success = result.is_success(),
            errors = result.errors().len(),
            "Pipeline run complete"
        );

        Ok(result)
    }

    /// Run with a fresh token that the caller never cancels.
    pub async fn run_to_completion(&self, context: &C) -> Result<PipelineResult, Cancelled> {
        self.run(context, &CancellationToken::new()).await
    }
}

impl<C: ?Sized + Sync> Clone for Pipeline<C> {
    fn clone(&self) -> Self {
        Self {
            rules: Arc::clone(&self.rules),
        }
    }
}

impl<C: ?Sized + Sync> fmt::Debug for Pipeline<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("rules", &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>())
            .finish()
    }
}

/// Pipelines nest: an inner pipeline's errors appear in the outer result at
/// the position the inner pipeline was added.
#[async_trait]
impl<C: ?Sized + Sync> Rule<C> for Pipeline<C> {
    fn name(&self) -> &str {
        "pipeline"
    }

    async fn evaluate(
        &self,
        context: &C,
        cancel: &CancellationToken,
    ) -> Result<RuleOutcome, Cancelled> {
        check_cancelled(cancel)?;
        self.run(context, cancel).await.map(RuleOutcome::from)
    }
}
