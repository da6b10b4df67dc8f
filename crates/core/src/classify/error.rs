//! Classification error types.

use thiserror::Error;

/// Errors that can occur while classifying a transaction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    /// The requested account does not exist for the company.
    #[error("Account '{0}' does not exist")]
    UnknownAccount(String),

    /// The requested account is inactive.
    #[error("Account '{0}' is inactive and cannot receive postings")]
    AccountInactive(String),

    /// A posted journal entry in a closed period references this transaction.
    #[error("Transaction is referenced by a journal entry in a closed fiscal period")]
    PeriodClosed,

    /// A posted journal entry in an open period references this transaction.
    #[error("Transaction is referenced by a posted journal entry; reverse it before re-classifying")]
    EntryPosted,
}

impl ClassifyError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAccount(_) => "UNKNOWN_ACCOUNT",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::PeriodClosed => "PERIOD_CLOSED",
            Self::EntryPosted => "CANNOT_MODIFY_POSTED",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::UnknownAccount(_) => 404,
            Self::AccountInactive(_) => 400,
            Self::PeriodClosed | Self::EntryPosted => 422,
        }
    }
}
