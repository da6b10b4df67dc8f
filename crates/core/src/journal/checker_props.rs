//! Property-based tests for the consistency checker.
//!
//! - Balanced entries always validate in an open period
//! - Unbalanced entries never validate
//! - Validation of a sub-cent discrepancy is still a hard failure

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;

use super::checker::validate;
use super::error::JournalError;
use super::types::{EntryStatus, JournalEntry, JournalLine};
use crate::fiscal::FiscalPeriodStatus;
use grootboek_shared::types::{
    BankTransactionId, CompanyId, FiscalPeriodId, JournalEntryId, Money, UserId,
};

/// Strategy to generate positive cent amounts (0.01 to 100,000.00).
fn positive_cents() -> impl Strategy<Value = i64> {
    1i64..10_000_000i64
}

fn make_entry(lines: Vec<JournalLine>) -> JournalEntry {
    JournalEntry {
        id: JournalEntryId::new(),
        company_id: CompanyId::new(),
        fiscal_period_id: FiscalPeriodId::new(),
        reference: Some("JE-1".to_string()),
        entry_date: NaiveDate::from_ymd_opt(2025, 6, 25).unwrap(),
        description: "prop entry".to_string(),
        created_by: UserId::new(),
        created_at: Utc::now(),
        status: EntryStatus::Draft,
        lines,
    }
}

fn open_period(_: FiscalPeriodId) -> Option<FiscalPeriodStatus> {
    Some(FiscalPeriodStatus::Open)
}

fn no_sources(_: BankTransactionId) -> Option<FiscalPeriodId> {
    None
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any two-line entry with equal debit and credit cents validates.
    #[test]
    fn prop_balanced_entries_validate(cents in positive_cents()) {
        let entry = make_entry(vec![
            JournalLine::debit("8100", Money::from_cents(cents), "d", None),
            JournalLine::credit("1100", Money::from_cents(cents), "c", None),
        ]);
        prop_assert!(validate(&entry, open_period, no_sources).is_ok());
    }

    /// Any entry whose sides differ by at least one cent is rejected with
    /// the exact discrepancy.
    #[test]
    fn prop_unbalanced_entries_rejected(
        cents in positive_cents(),
        skew in 1i64..1_000i64,
    ) {
        let entry = make_entry(vec![
            JournalLine::debit("8100", Money::from_cents(cents + skew), "d", None),
            JournalLine::credit("1100", Money::from_cents(cents), "c", None),
        ]);
        let result = validate(&entry, open_period, no_sources);
        prop_assert!(
            matches!(
                result,
                Err(JournalError::Unbalanced { difference_cents, .. }) if difference_cents == skew
            ),
            "expected Unbalanced with difference {skew}, got {result:?}"
        );
    }

    /// Splitting one side across many lines never breaks the balance check.
    #[test]
    fn prop_multi_line_split_balances(
        parts in prop::collection::vec(positive_cents(), 1..8),
    ) {
        let total: i64 = parts.iter().sum();
        let mut lines: Vec<JournalLine> = parts
            .iter()
            .map(|&cents| JournalLine::debit("8100", Money::from_cents(cents), "d", None))
            .collect();
        lines.push(JournalLine::credit("1100", Money::from_cents(total), "c", None));

        let entry = make_entry(lines);
        prop_assert!(validate(&entry, open_period, no_sources).is_ok());
    }

    /// A closed period rejects every entry, balanced or not.
    #[test]
    fn prop_closed_period_rejects_all(cents in positive_cents()) {
        let entry = make_entry(vec![
            JournalLine::debit("8100", Money::from_cents(cents), "d", None),
            JournalLine::credit("1100", Money::from_cents(cents), "c", None),
        ]);
        let closed = |_: FiscalPeriodId| Some(FiscalPeriodStatus::Closed);
        prop_assert_eq!(
            validate(&entry, closed, no_sources),
            Err(JournalError::PeriodClosed)
        );
    }
}
