//! Core business logic for Grootboek.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here. Collaborators (account lookup, period lookup, reference allocation)
//! are always injected as function arguments, never reached through ambient
//! state.
//!
//! # Modules
//!
//! - `account` - Chart of accounts types and the normal-side convention
//! - `fiscal` - Fiscal period management
//! - `statement` - Imported bank-statement transactions
//! - `rules` - Classification rules and their validation
//! - `classify` - Rule matching and classification suggestions
//! - `journal` - Double-entry journal construction and consistency checking
//! - `batch` - Bulk auto-classification planning

pub mod account;
pub mod batch;
pub mod classify;
pub mod fiscal;
pub mod journal;
pub mod rules;
pub mod statement;
