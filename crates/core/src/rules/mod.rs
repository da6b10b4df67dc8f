//! Classification rules: pattern-to-account mappings.
//!
//! Rules are append-only per company. An edit is modeled as deactivating the
//! old rule and creating a new one, so that every historical classification
//! remains explainable by the exact rule that produced it.

pub mod types;
pub mod validation;

pub use types::{ClassificationRule, MatchType, NewRule, rule_order};
pub use validation::{RuleValidationError, validate_new_rule};
