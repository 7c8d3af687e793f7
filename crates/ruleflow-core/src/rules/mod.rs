//! Bundled rules over selected context fields.
//!
//! Each rule pairs a field name (used in messages) with a selector closure
//! that projects the field out of the context. Selectors are plain functions
//! of the context, so the rules stay stateless and shareable.

mod from_fn;
mod min_length;
mod not_null;
mod pattern;

pub use from_fn::{from_fn, FnRule};
pub use min_length::MinLengthRule;
pub use not_null::NotNullRule;
pub use pattern::PatternRule;
