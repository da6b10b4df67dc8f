//! Journal error types for construction and validation.

use rust_decimal::Decimal;
use thiserror::Error;

use grootboek_shared::types::{BankTransactionId, FiscalPeriodId};

/// Errors that can occur while building or validating a journal entry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JournalError {
    // ========== Construction Errors ==========
    /// The source transaction has not been classified.
    #[error("Transaction has not been classified")]
    NotClassified,

    /// The source statement line is malformed.
    #[error("Malformed statement line: {0}")]
    MalformedTransaction(String),

    /// Split lines do not sum to the transaction amount.
    #[error("Split lines sum to {actual}, expected {expected}")]
    SplitMismatch {
        /// The transaction amount the splits must cover.
        expected: Decimal,
        /// What the supplied split lines actually sum to.
        actual: Decimal,
    },

    /// A split was supplied with no lines.
    #[error("Split entry requires at least one non-bank line")]
    EmptySplit,

    // ========== Account Errors ==========
    /// Account not found for the company.
    #[error("Account '{0}' does not exist")]
    UnknownAccount(String),

    /// Account exists but is inactive.
    #[error("Account '{0}' is inactive and cannot receive postings")]
    AccountInactive(String),

    // ========== Validation Errors ==========
    /// Entry must have at least 2 lines.
    #[error("Journal entry must have at least 2 lines")]
    InsufficientLines,

    /// A line has a zero amount on both sides.
    #[error("Journal line must carry a debit or a credit amount")]
    ZeroAmountLine,

    /// A line amount is negative.
    #[error("Journal line amounts must be positive")]
    NegativeAmountLine,

    /// A line carries both a debit and a credit.
    #[error("Journal line cannot be both a debit and a credit")]
    TwoSidedLine,

    /// An amount carries precision beyond whole cents.
    #[error("Amount {0} has sub-cent precision")]
    SubCentPrecision(Decimal),

    /// Entry does not balance; the discrepancy is exact integer cents.
    #[error(
        "Entry is unbalanced: debits {debits} != credits {credits} (difference {difference_cents} cents)"
    )]
    Unbalanced {
        /// Total debit amount.
        debits: Decimal,
        /// Total credit amount.
        credits: Decimal,
        /// Exact discrepancy in integer cents (debits - credits).
        difference_cents: i64,
    },

    // ========== Fiscal Period Errors ==========
    /// The entry's fiscal period is unknown.
    #[error("Unknown fiscal period: {0}")]
    UnknownPeriod(FiscalPeriodId),

    /// The entry's fiscal period is closed.
    #[error("Fiscal period is closed, no posting allowed")]
    PeriodClosed,

    /// A line's source transaction lives in a different fiscal period.
    #[error("Source transaction {transaction_id} is not in fiscal period {period_id}")]
    SourcePeriodMismatch {
        /// The offending source transaction.
        transaction_id: BankTransactionId,
        /// The entry's fiscal period.
        period_id: FiscalPeriodId,
    },

    // ========== State Errors ==========
    /// The entry reference is already taken for this company.
    #[error("Reference '{0}' already exists for this company")]
    DuplicateReference(String),

    /// Posted entries are immutable.
    #[error("Cannot modify posted journal entry")]
    CannotModifyPosted,

    /// A persisted entry failed the balance invariant at read time.
    #[error("Persisted entry '{reference}' is unbalanced (difference {difference_cents} cents)")]
    CorruptEntry {
        /// The entry's reference.
        reference: String,
        /// Exact discrepancy in integer cents.
        difference_cents: i64,
    },
}

impl JournalError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotClassified => "NOT_CLASSIFIED",
            Self::MalformedTransaction(_) => "MALFORMED_TRANSACTION",
            Self::SplitMismatch { .. } => "SPLIT_MISMATCH",
            Self::EmptySplit => "EMPTY_SPLIT",
            Self::UnknownAccount(_) => "UNKNOWN_ACCOUNT",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::ZeroAmountLine => "ZERO_AMOUNT_LINE",
            Self::NegativeAmountLine => "NEGATIVE_AMOUNT_LINE",
            Self::TwoSidedLine => "TWO_SIDED_LINE",
            Self::SubCentPrecision(_) => "SUB_CENT_PRECISION",
            Self::Unbalanced { .. } => "UNBALANCED_ENTRY",
            Self::UnknownPeriod(_) => "UNKNOWN_PERIOD",
            Self::PeriodClosed => "PERIOD_CLOSED",
            Self::SourcePeriodMismatch { .. } => "SOURCE_PERIOD_MISMATCH",
            Self::DuplicateReference(_) => "DUPLICATE_REFERENCE",
            Self::CannotModifyPosted => "CANNOT_MODIFY_POSTED",
            Self::CorruptEntry { .. } => "LEDGER_CORRUPTION",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - construction/validation errors
            Self::NotClassified
            | Self::MalformedTransaction(_)
            | Self::SplitMismatch { .. }
            | Self::EmptySplit
            | Self::AccountInactive(_)
            | Self::InsufficientLines
            | Self::ZeroAmountLine
            | Self::NegativeAmountLine
            | Self::TwoSidedLine
            | Self::SubCentPrecision(_)
            | Self::Unbalanced { .. } => 400,

            // 404 Not Found
            Self::UnknownAccount(_) | Self::UnknownPeriod(_) => 404,

            // 409 Conflict
            Self::DuplicateReference(_) => 409,

            // 422 Unprocessable - business rule violations
            Self::PeriodClosed
            | Self::SourcePeriodMismatch { .. }
            | Self::CannotModifyPosted => 422,

            // 500 Internal Server Error - prior corruption
            Self::CorruptEntry { .. } => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            JournalError::Unbalanced {
                debits: dec!(100.00),
                credits: dec!(50.00),
                difference_cents: 5000,
            }
            .error_code(),
            "UNBALANCED_ENTRY"
        );
        assert_eq!(JournalError::PeriodClosed.error_code(), "PERIOD_CLOSED");
        assert_eq!(
            JournalError::DuplicateReference("JE-1".to_string()).error_code(),
            "DUPLICATE_REFERENCE"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(JournalError::InsufficientLines.http_status_code(), 400);
        assert_eq!(
            JournalError::UnknownAccount("9999".to_string()).http_status_code(),
            404
        );
        assert_eq!(
            JournalError::DuplicateReference("JE-1".to_string()).http_status_code(),
            409
        );
        assert_eq!(JournalError::PeriodClosed.http_status_code(), 422);
        assert_eq!(
            JournalError::CorruptEntry {
                reference: "JE-1".to_string(),
                difference_cents: 1,
            }
            .http_status_code(),
            500
        );
    }

    #[test]
    fn test_unbalanced_display_names_exact_discrepancy() {
        let error = JournalError::Unbalanced {
            debits: dec!(100.00),
            credits: dec!(90.00),
            difference_cents: 1000,
        };
        assert_eq!(
            error.to_string(),
            "Entry is unbalanced: debits 100.00 != credits 90.00 (difference 1000 cents)"
        );
    }
}
