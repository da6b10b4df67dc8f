//! Journal entry construction from classified bank transactions.
//!
//! The builder only constructs; every entry it produces is handed to the
//! consistency checker before being considered committed, and persistence is
//! the store's job.

use chrono::{DateTime, Utc};

use super::error::JournalError;
use super::types::{EntryStatus, JournalEntry, JournalLine};
use crate::account::AccountInfo;
use crate::statement::{BankTransaction, Direction};
use grootboek_shared::types::{JournalEntryId, Money, UserId};

/// One caller-supplied non-bank leg of a split transaction.
#[derive(Debug, Clone)]
pub struct SplitLine {
    /// Ledger account this split posts to.
    pub account_code: String,
    /// Portion of the transaction amount.
    pub amount: Money,
    /// Optional line description; defaults to the transaction description.
    pub description: Option<String>,
}

/// Builds a balanced two-line entry for a simple classified transaction.
///
/// If money left the bank (`debit_amount > 0`) the entry debits the
/// classified account and credits the bank account; if money arrived it
/// credits the classified account and debits the bank account.
///
/// `reference` is optional; when `None` the store allocates the next value
/// of the per-company sequence at posting time.
///
/// # Errors
///
/// Returns `JournalError::NotClassified` for an unclassified transaction,
/// `MalformedTransaction` for a bad statement line, and account errors when
/// either side of the entry references a missing or inactive account.
pub fn build_entry<A>(
    tx: &BankTransaction,
    bank_account_code: &str,
    created_by: UserId,
    reference: Option<String>,
    account_lookup: A,
    now: DateTime<Utc>,
) -> Result<JournalEntry, JournalError>
where
    A: Fn(&str) -> Option<AccountInfo>,
{
    let classified_code = tx
        .classified_account_code
        .as_deref()
        .ok_or(JournalError::NotClassified)?;

    let split = [SplitLine {
        account_code: classified_code.to_string(),
        amount: tx.amount(),
        description: None,
    }];
    build_split_entry(tx, bank_account_code, &split, created_by, reference, account_lookup, now)
}

/// Builds an entry for a transaction split across several non-bank accounts.
///
/// The caller pre-splits the amount; the builder validates that the split
/// lines sum exactly to the transaction amount before adding the single
/// offsetting bank line.
///
/// # Errors
///
/// Returns `JournalError::SplitMismatch` when the splits do not cover the
/// transaction amount, plus the same construction errors as [`build_entry`].
pub fn build_split_entry<A>(
    tx: &BankTransaction,
    bank_account_code: &str,
    splits: &[SplitLine],
    created_by: UserId,
    reference: Option<String>,
    account_lookup: A,
    now: DateTime<Utc>,
) -> Result<JournalEntry, JournalError>
where
    A: Fn(&str) -> Option<AccountInfo>,
{
    let direction = tx
        .direction()
        .map_err(|e| JournalError::MalformedTransaction(e.to_string()))?;

    if splits.is_empty() {
        return Err(JournalError::EmptySplit);
    }

    for split in splits {
        if split.amount.is_negative() {
            return Err(JournalError::NegativeAmountLine);
        }
        if split.amount.is_zero() {
            return Err(JournalError::ZeroAmountLine);
        }
        check_account(&account_lookup, &split.account_code)?;
    }
    check_account(&account_lookup, bank_account_code)?;

    let amount = tx.amount();
    let split_total: Money = splits.iter().map(|s| s.amount).sum();
    if split_total != amount {
        return Err(JournalError::SplitMismatch {
            expected: amount.amount(),
            actual: split_total.amount(),
        });
    }

    let mut lines = Vec::with_capacity(splits.len() + 1);
    for split in splits {
        let description = split
            .description
            .clone()
            .unwrap_or_else(|| tx.description.clone());
        let line = match direction {
            Direction::MoneyOut => {
                JournalLine::debit(&split.account_code, split.amount, description, Some(tx.id))
            }
            Direction::MoneyIn => {
                JournalLine::credit(&split.account_code, split.amount, description, Some(tx.id))
            }
        };
        lines.push(line);
    }

    // Single offsetting bank line for the full amount.
    let bank_line = match direction {
        Direction::MoneyOut => {
            JournalLine::credit(bank_account_code, amount, tx.description.clone(), Some(tx.id))
        }
        Direction::MoneyIn => {
            JournalLine::debit(bank_account_code, amount, tx.description.clone(), Some(tx.id))
        }
    };
    lines.push(bank_line);

    Ok(JournalEntry {
        id: JournalEntryId::new(),
        company_id: tx.company_id,
        fiscal_period_id: tx.fiscal_period_id,
        reference,
        entry_date: tx.date,
        description: tx.description.clone(),
        created_by,
        created_at: now,
        status: EntryStatus::Draft,
        lines,
    })
}

fn check_account<A>(account_lookup: &A, code: &str) -> Result<(), JournalError>
where
    A: Fn(&str) -> Option<AccountInfo>,
{
    let account =
        account_lookup(code).ok_or_else(|| JournalError::UnknownAccount(code.to_string()))?;
    if !account.is_active {
        return Err(JournalError::AccountInactive(code.to_string()));
    }
    Ok(())
}
