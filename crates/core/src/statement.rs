//! Imported bank-statement transactions.
//!
//! Statement ingestion (PDF/CSV parsing) is an external collaborator; it
//! hands the core well-formed `BankTransaction` records. Exactly one of
//! `debit_amount` / `credit_amount` is positive - money out of the bank
//! account versus money in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use grootboek_shared::types::{BankTransactionId, CompanyId, FiscalPeriodId, Money};

/// Direction of money movement on the bank account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Money left the bank account (expense, asset purchase).
    MoneyOut,
    /// Money arrived in the bank account (income, liability increase).
    MoneyIn,
}

/// A malformed statement line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatementError {
    /// Neither or both of debit/credit amount are positive.
    #[error("Exactly one of debit amount and credit amount must be positive")]
    AmbiguousDirection,

    /// An amount is negative.
    #[error("Statement amounts must not be negative")]
    NegativeAmount,
}

/// A bank-statement line awaiting or having received classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankTransaction {
    /// Unique identifier.
    pub id: BankTransactionId,
    /// Company this transaction belongs to.
    pub company_id: CompanyId,
    /// Fiscal period the transaction date falls in.
    pub fiscal_period_id: FiscalPeriodId,
    /// Transaction date.
    pub date: NaiveDate,
    /// Free-text statement description.
    pub description: String,
    /// Amount of money that left the bank account (zero if money in).
    pub debit_amount: Money,
    /// Amount of money that arrived in the bank account (zero if money out).
    pub credit_amount: Money,
    /// Running balance after this line, when the statement provides one.
    pub running_balance: Option<Money>,
    /// Classified ledger account code; `None` until classified.
    pub classified_account_code: Option<String>,
}

impl BankTransaction {
    /// Validates the debit/credit shape of the statement line.
    ///
    /// # Errors
    ///
    /// Returns `StatementError` if amounts are negative or if not exactly
    /// one of debit/credit is positive.
    pub fn validate(&self) -> Result<(), StatementError> {
        if self.debit_amount.is_negative() || self.credit_amount.is_negative() {
            return Err(StatementError::NegativeAmount);
        }
        if self.debit_amount.is_positive() == self.credit_amount.is_positive() {
            return Err(StatementError::AmbiguousDirection);
        }
        Ok(())
    }

    /// Returns the direction of money movement.
    ///
    /// # Errors
    ///
    /// Returns `StatementError::AmbiguousDirection` for malformed lines.
    pub fn direction(&self) -> Result<Direction, StatementError> {
        self.validate()?;
        if self.debit_amount.is_positive() {
            Ok(Direction::MoneyOut)
        } else {
            Ok(Direction::MoneyIn)
        }
    }

    /// Returns the transaction amount (whichever side is positive).
    #[must_use]
    pub fn amount(&self) -> Money {
        if self.debit_amount.is_positive() {
            self.debit_amount
        } else {
            self.credit_amount
        }
    }

    /// Returns true if the transaction has been classified.
    #[must_use]
    pub fn is_classified(&self) -> bool {
        self.classified_account_code.is_some()
    }
}
