//! Double-entry journal construction and consistency checking.
//!
//! This module implements:
//! - Journal entry and line types with the Draft -> Validated -> Posted
//!   state machine
//! - The entry builder that turns a classified bank transaction into a
//!   balanced two-line (or split) entry
//! - The consistency checker that enforces the balance invariant and the
//!   closed-period rule before anything is persisted
//! - Error types for journal operations

pub mod builder;
pub mod checker;
pub mod error;
pub mod types;

#[cfg(test)]
mod checker_props;

pub use builder::{SplitLine, build_entry, build_split_entry};
pub use checker::{run_checks, validate, verify_persisted};
pub use error::JournalError;
pub use types::{EntryStatus, JournalEntry, JournalLine};
