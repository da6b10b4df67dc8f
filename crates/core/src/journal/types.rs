//! Journal entry domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use grootboek_shared::types::{
    BankTransactionId, CompanyId, FiscalPeriodId, JournalEntryId, JournalLineId, Money, UserId,
};

/// Journal entry status in the validation state machine.
///
/// Entries progress Draft -> Validated -> Posted; a failed validation moves
/// a draft to Rejected, which is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry is being constructed and can be modified.
    Draft,
    /// Entry passed validation and is eligible for posting.
    Validated,
    /// Entry has been persisted to the ledger (immutable).
    Posted,
    /// Entry failed validation (terminal, never persisted).
    Rejected,
}

impl EntryStatus {
    /// Returns true if the entry's lines can still be edited.
    #[must_use]
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Draft | Self::Validated)
    }

    /// Returns true if the entry may be handed to the persister.
    #[must_use]
    pub fn is_postable(self) -> bool {
        matches!(self, Self::Validated)
    }
}

/// One leg of a journal entry.
///
/// Exactly one of `debit` / `credit` is non-zero; a line cannot be both a
/// debit and a credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Unique identifier.
    pub id: JournalLineId,
    /// Ledger account this line posts to.
    pub account_code: String,
    /// Debit amount (zero if this is a credit line).
    pub debit: Money,
    /// Credit amount (zero if this is a debit line).
    pub credit: Money,
    /// Line description.
    pub description: String,
    /// Back-reference to the originating bank transaction, if any. When
    /// present it must point to a transaction in the same fiscal period as
    /// the entry.
    pub source_transaction_id: Option<BankTransactionId>,
}

impl JournalLine {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(
        account_code: impl Into<String>,
        amount: Money,
        description: impl Into<String>,
        source_transaction_id: Option<BankTransactionId>,
    ) -> Self {
        Self {
            id: JournalLineId::new(),
            account_code: account_code.into(),
            debit: amount,
            credit: Money::ZERO,
            description: description.into(),
            source_transaction_id,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(
        account_code: impl Into<String>,
        amount: Money,
        description: impl Into<String>,
        source_transaction_id: Option<BankTransactionId>,
    ) -> Self {
        Self {
            id: JournalLineId::new(),
            account_code: account_code.into(),
            debit: Money::ZERO,
            credit: amount,
            description: description.into(),
            source_transaction_id,
        }
    }
}

/// A balanced accounting event: at least two lines whose debits equal their
/// credits to the cent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: JournalEntryId,
    /// Company this entry belongs to.
    pub company_id: CompanyId,
    /// Fiscal period this entry posts into.
    pub fiscal_period_id: FiscalPeriodId,
    /// Reference, unique per company (e.g. "JE-42" or "OB-7"). Allocated
    /// from the per-company sequence at posting time when not supplied by
    /// the caller.
    pub reference: Option<String>,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// User who created the entry.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Current status in the validation state machine.
    pub status: EntryStatus,
    /// The entry's lines (owned; deleting the entry deletes them).
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    /// Sum of all debit amounts.
    #[must_use]
    pub fn total_debits(&self) -> Money {
        self.lines.iter().map(|line| line.debit).sum()
    }

    /// Sum of all credit amounts.
    #[must_use]
    pub fn total_credits(&self) -> Money {
        self.lines.iter().map(|line| line.credit).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_editable() {
        assert!(EntryStatus::Draft.is_editable());
        assert!(EntryStatus::Validated.is_editable());
        assert!(!EntryStatus::Posted.is_editable());
        assert!(!EntryStatus::Rejected.is_editable());
    }

    #[test]
    fn test_status_postable() {
        assert!(!EntryStatus::Draft.is_postable());
        assert!(EntryStatus::Validated.is_postable());
        assert!(!EntryStatus::Posted.is_postable());
        assert!(!EntryStatus::Rejected.is_postable());
    }

    #[test]
    fn test_totals() {
        let entry = JournalEntry {
            id: JournalEntryId::new(),
            company_id: CompanyId::new(),
            fiscal_period_id: FiscalPeriodId::new(),
            reference: None,
            entry_date: NaiveDate::from_ymd_opt(2025, 6, 25).unwrap(),
            description: "Salary run".to_string(),
            created_by: UserId::new(),
            created_at: Utc::now(),
            status: EntryStatus::Draft,
            lines: vec![
                JournalLine::debit("8100", Money::new(dec!(15000.00)), "Salary", None),
                JournalLine::credit("1100", Money::new(dec!(15000.00)), "Bank", None),
            ],
        };
        assert_eq!(entry.total_debits(), Money::new(dec!(15000.00)));
        assert_eq!(entry.total_credits(), Money::new(dec!(15000.00)));
    }
}
