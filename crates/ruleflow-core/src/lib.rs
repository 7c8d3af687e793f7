//! # ruleflow-core
//!
//! Composable, cancellable validation pipelines.
//!
//! A [`Pipeline`] runs an ordered list of independently defined [`Rule`]s
//! against a context value and folds their outcomes into one
//! [`PipelineResult`]: a pass/fail verdict plus a flat, ordered list of
//! [`RuleError`]s.
//!
//! ## Key Guarantees
//!
//! 1. **Ordered**: Rules run one at a time in insertion order; errors appear
//!    in rule order, then in each rule's own order
//! 2. **Immutable**: A built pipeline never changes, so it can be shared and
//!    run concurrently without coordination
//! 3. **Cancellable**: The token is checked before every rule; a cancelled
//!    run yields [`Cancelled`], never a partial result
//! 4. **Two error channels**: Wiring mistakes are [`BuildError`]s at build
//!    time; invalid input is data inside the result
//!
//! ## Example
//!
//! ```rust,ignore
//! use ruleflow_core::{MinLengthRule, NotNullRule, PipelineBuilder};
//! use tokio_util::sync::CancellationToken;
//!
//! let pipeline = PipelineBuilder::new()
//!     .add_rule(NotNullRule::new("Email", |r: &Registration| r.email.as_ref()))
//!     .add_rule(NotNullRule::new("Password", |r: &Registration| r.password.as_ref()))
//!     .add_rule(MinLengthRule::new("Password", 8, |r: &Registration| r.password.as_deref()))
//!     .build();
//!
//! let result = pipeline.run(&registration, &CancellationToken::new()).await?;
//! for error in result.errors() {
//!     println!("[{}] {}", error.code(), error.message());
//! }
//! ```

pub mod builder;
pub mod error;
pub mod pipeline;
pub mod rule;
pub mod rules;
pub mod types;

// Re-export main types at crate root
pub use builder::{PipelineBuilder, SharedRule};
pub use error::{BuildError, Cancelled, RuleConfigError};
pub use pipeline::Pipeline;
pub use rule::{check_cancelled, Rule};
pub use rules::{from_fn, FnRule, MinLengthRule, NotNullRule, PatternRule};
pub use types::{codes, PipelineResult, RuleError, RuleOutcome};

// Hosts implementing `Rule` need the same token type and trait macro.
pub use async_trait::async_trait;
pub use tokio_util::sync::CancellationToken;
