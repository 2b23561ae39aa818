//! Request validation: the rule registry and the pipeline that runs it.

pub mod pipeline;
pub mod rules;

pub use pipeline::{Check, FieldCheck, FieldRule, RequestView, RuleSet, Source};
