//! Ledger consistency checking.
//!
//! Every constructed or edited entry passes through here before persistence.
//! The balance check compares debits and credits as exact integer cents -
//! never floating point with a tolerance - and any non-zero difference is a
//! hard error naming the exact discrepancy.

use tracing::error;

use super::error::JournalError;
use super::types::{EntryStatus, JournalEntry, JournalLine};
use crate::fiscal::FiscalPeriodStatus;
use grootboek_shared::types::{BankTransactionId, FiscalPeriodId};

/// Validates a journal entry without touching its status.
///
/// Checks, in order: line count, per-line debit-XOR-credit shape, exact
/// integer-cent balance, the entry's fiscal period being open, and every
/// source-transaction back-reference pointing into the entry's own period.
///
/// # Errors
///
/// Returns the first `JournalError` encountered.
pub fn validate<P, T>(
    entry: &JournalEntry,
    period_status: P,
    source_period: T,
) -> Result<(), JournalError>
where
    P: Fn(FiscalPeriodId) -> Option<FiscalPeriodStatus>,
    T: Fn(BankTransactionId) -> Option<FiscalPeriodId>,
{
    if entry.lines.len() < 2 {
        return Err(JournalError::InsufficientLines);
    }

    let mut debit_cents: i64 = 0;
    let mut credit_cents: i64 = 0;
    for line in &entry.lines {
        let (side_debit, side_credit) = line_cents(line)?;
        debit_cents += side_debit;
        credit_cents += side_credit;
    }

    if debit_cents != credit_cents {
        return Err(JournalError::Unbalanced {
            debits: entry.total_debits().amount(),
            credits: entry.total_credits().amount(),
            difference_cents: debit_cents - credit_cents,
        });
    }

    let status = period_status(entry.fiscal_period_id)
        .ok_or(JournalError::UnknownPeriod(entry.fiscal_period_id))?;
    if !status.allows_posting() {
        return Err(JournalError::PeriodClosed);
    }

    for line in &entry.lines {
        if let Some(tx_id) = line.source_transaction_id {
            let tx_period = source_period(tx_id);
            if tx_period != Some(entry.fiscal_period_id) {
                return Err(JournalError::SourcePeriodMismatch {
                    transaction_id: tx_id,
                    period_id: entry.fiscal_period_id,
                });
            }
        }
    }

    Ok(())
}

/// Converts one line to `(debit_cents, credit_cents)`, enforcing the
/// debit-XOR-credit invariant.
fn line_cents(line: &JournalLine) -> Result<(i64, i64), JournalError> {
    if line.debit.is_negative() || line.credit.is_negative() {
        return Err(JournalError::NegativeAmountLine);
    }
    if line.debit.is_positive() && line.credit.is_positive() {
        return Err(JournalError::TwoSidedLine);
    }
    if line.debit.is_zero() && line.credit.is_zero() {
        return Err(JournalError::ZeroAmountLine);
    }
    let debit = line
        .debit
        .to_cents()
        .map_err(|_| JournalError::SubCentPrecision(line.debit.amount()))?;
    let credit = line
        .credit
        .to_cents()
        .map_err(|_| JournalError::SubCentPrecision(line.credit.amount()))?;
    Ok((debit, credit))
}

/// Runs the checker against a draft (or edited) entry and advances its
/// status: `Validated` on success, `Rejected` on failure.
///
/// Re-validation after an edit goes through the same path; a rejected
/// re-validation leaves the caller's persisted state untouched because
/// nothing is written until this returns `Ok`.
///
/// # Errors
///
/// `JournalError::CannotModifyPosted` when called on a posted entry,
/// otherwise the underlying validation error (with the entry moved to
/// `Rejected`).
pub fn run_checks<P, T>(
    entry: &mut JournalEntry,
    period_status: P,
    source_period: T,
) -> Result<(), JournalError>
where
    P: Fn(FiscalPeriodId) -> Option<FiscalPeriodStatus>,
    T: Fn(BankTransactionId) -> Option<FiscalPeriodId>,
{
    if entry.status == EntryStatus::Posted {
        return Err(JournalError::CannotModifyPosted);
    }

    match validate(entry, period_status, source_period) {
        Ok(()) => {
            entry.status = EntryStatus::Validated;
            Ok(())
        }
        Err(error) => {
            entry.status = EntryStatus::Rejected;
            Err(error)
        }
    }
}

/// Read-time invariant check for a persisted entry.
///
/// An unbalanced persisted entry means prior corruption: it is reported
/// loudly and never "fixed" automatically.
///
/// # Errors
///
/// Returns `JournalError::CorruptEntry` naming the exact discrepancy.
pub fn verify_persisted(entry: &JournalEntry) -> Result<(), JournalError> {
    let debits = entry.total_debits();
    let credits = entry.total_credits();
    let difference = (debits - credits).to_cents().unwrap_or(i64::MAX);
    if difference != 0 {
        let reference = entry.reference.clone().unwrap_or_else(|| entry.id.to_string());
        error!(
            entry_id = %entry.id,
            reference = %reference,
            difference_cents = difference,
            "Persisted journal entry is unbalanced - ledger corruption"
        );
        return Err(JournalError::CorruptEntry {
            reference,
            difference_cents: difference,
        });
    }
    Ok(())
}
