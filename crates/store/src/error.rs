//! Store-level error type.
//!
//! Repository methods surface the core's domain errors unchanged so callers
//! (the API layer in particular) keep the per-variant error codes; only the
//! store's own concerns (missing rows, duplicate inserts) add variants here.

use thiserror::Error;

use grootboek_core::account::InvalidAccountCode;
use grootboek_core::classify::ClassifyError;
use grootboek_core::journal::JournalError;
use grootboek_core::rules::RuleValidationError;
use grootboek_core::statement::StatementError;
use grootboek_shared::AppError;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A journal construction or consistency error.
    #[error(transparent)]
    Journal(#[from] JournalError),

    /// A classification error.
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    /// A rule input failed validation.
    #[error(transparent)]
    Rule(#[from] RuleValidationError),

    /// A malformed bank-statement line.
    #[error(transparent)]
    Statement(#[from] StatementError),

    /// An account code outside the numbering convention.
    #[error(transparent)]
    AccountCode(#[from] InvalidAccountCode),

    /// A cross-cutting application error (not found, conflict, internal).
    #[error(transparent)]
    App(#[from] AppError),
}

impl StoreError {
    /// Machine-readable error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Journal(e) => e.error_code(),
            Self::Classify(e) => e.error_code(),
            Self::Rule(e) => e.error_code(),
            Self::Statement(_) => "MALFORMED_TRANSACTION",
            Self::AccountCode(_) => "INVALID_ACCOUNT_CODE",
            Self::App(e) => e.error_code(),
        }
    }

    /// HTTP status for API responses.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Journal(e) => e.http_status_code(),
            Self::Classify(e) => e.http_status_code(),
            Self::Rule(_) | Self::Statement(_) | Self::AccountCode(_) => 400,
            Self::App(e) => e.status_code(),
        }
    }

    /// Shorthand for a not-found error naming the resource.
    pub(crate) fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        Self::App(AppError::NotFound(format!("{resource} {id}")))
    }
}
