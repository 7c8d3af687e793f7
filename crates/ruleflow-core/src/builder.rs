//! Fluent accumulation of rules into a frozen [`Pipeline`].

use std::sync::Arc;

use crate::error::BuildError;
use crate::pipeline::Pipeline;
use crate::rule::Rule;

/// A shared, type-erased rule as stored by builders and pipelines.
pub type SharedRule<C> = Arc<dyn Rule<C>>;

/// Mutable accumulator of rules.
///
/// [`build`](Self::build) snapshots the rules collected so far; the builder
/// stays usable and later additions never reach pipelines already built.
/// Not meant to be shared between threads while being filled.
pub struct PipelineBuilder<C: ?Sized + Sync> {
    rules: Vec<SharedRule<C>>,
}

impl<C: ?Sized + Sync> PipelineBuilder<C> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append one rule.
    pub fn add_rule<R>(&mut self, rule: R) -> &mut Self
    where
        R: Rule<C> + 'static,
    {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Append every rule from `rules`, in iteration order.
    pub fn add_rules<I>(&mut self, rules: I) -> &mut Self
    where
        I: IntoIterator<Item = SharedRule<C>>,
    {
        self.rules.extend(rules);
        self
    }

    /// Append a rule that may be absent, e.g. one resolved by name at runtime.
    ///
    /// # Errors
    /// [`BuildError::MissingRule`] if `rule` is `None`.
    pub fn try_add_rule(&mut self, rule: Option<SharedRule<C>>) -> Result<&mut Self, BuildError> {
        let rule = rule.ok_or(BuildError::MissingRule)?;
        self.rules.push(rule);
        Ok(self)
    }

    /// Append a rule set that may itself be absent or contain absent rules.
    ///
    /// The scan is fail-fast, not transactional: rules preceding the first
    /// absent element stay appended when the error is returned.
    ///
    /// # Errors
    /// - [`BuildError::MissingRuleSet`] if `rules` is `None`
    /// - [`BuildError::MissingRuleInSet`] at the first `None` element
    pub fn try_add_rules<I>(&mut self, rules: Option<I>) -> Result<&mut Self, BuildError>
    where
        I: IntoIterator<Item = Option<SharedRule<C>>>,
    {
        let rules = rules.ok_or(BuildError::MissingRuleSet)?;

        for (index, rule) in rules.into_iter().enumerate() {
            match rule {
                Some(rule) => self.rules.push(rule),
                None => {
                    tracing::debug!(index, "Rejected rule set with absent element");
                    return Err(BuildError::MissingRuleInSet { index });
                }
            }
        }

        Ok(self)
    }

    /// Number of rules accumulated so far.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Freeze the rules accumulated so far into a new pipeline.
    pub fn build(&self) -> Pipeline<C> {
        tracing::debug!(rules = self.rules.len(), "Building pipeline");
        Pipeline::from_rules(self.rules.clone())
    }
}

impl<C: ?Sized + Sync> Default for PipelineBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}
