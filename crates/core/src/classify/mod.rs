//! Rule matching and classification.
//!
//! The matcher is a pure function that returns every rule whose pattern
//! fires, preserving rule order; the classifier picks the winner and attaches
//! a confidence score. The separation exists so review UIs can show all
//! candidate matches, not just the decision.

pub mod classifier;
pub mod error;
pub mod matcher;

#[cfg(test)]
mod matcher_props;

pub use classifier::{ReclassifyLock, Suggestion, classify, suggest};
pub use error::ClassifyError;
pub use matcher::matching_rules;
