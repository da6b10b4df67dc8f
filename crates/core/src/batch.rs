//! Bulk auto-classification planning.
//!
//! The planning pass is embarrassingly parallel: matching is a pure function
//! and nothing is persisted here. The caller snapshots the active rule set
//! before planning (rule mutations never apply mid-batch) and serializes
//! only the final persistence of each planned entry.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::account::AccountInfo;
use crate::classify::{Suggestion, suggest};
use crate::rules::ClassificationRule;
use crate::statement::BankTransaction;
use grootboek_shared::types::{BankTransactionId, JournalEntryId};

/// The planning result for one transaction in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTransaction {
    /// The transaction this plan is for.
    pub transaction_id: BankTransactionId,
    /// The suggestion, or `None` when no rule matched.
    pub suggestion: Option<Suggestion>,
}

/// Plans a batch: computes a suggestion for every transaction against a
/// snapshot of the active rule set.
///
/// Output order matches input order. Transactions and rules are read-only;
/// no side effects occur.
#[must_use]
pub fn plan_batch<A>(
    transactions: &[BankTransaction],
    rules_snapshot: &[ClassificationRule],
    account_lookup: A,
) -> Vec<PlannedTransaction>
where
    A: Fn(&str) -> Option<AccountInfo> + Sync,
{
    transactions
        .par_iter()
        .map(|tx| PlannedTransaction {
            transaction_id: tx.id,
            suggestion: suggest(tx, rules_snapshot, &account_lookup),
        })
        .collect()
}

/// Final outcome for one transaction of an auto-classify run.
///
/// One failing transaction never aborts the batch; failures are collected
/// here and returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AutoClassifyOutcome {
    /// The transaction was classified and a journal entry was posted.
    Classified {
        /// The posted journal entry.
        journal_entry_id: JournalEntryId,
        /// The account the transaction was classified into.
        account_code: String,
        /// The suggestion confidence that drove the classification.
        confidence: rust_decimal::Decimal,
    },
    /// No rule matched; the transaction stays unclassified.
    NoMatch,
    /// Classification or journal construction failed for this transaction.
    Failed {
        /// Machine-readable error code.
        code: String,
        /// Human-readable error message.
        message: String,
    },
}

/// Per-transaction result row of an auto-classify run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoClassifyResult {
    /// The transaction processed.
    pub transaction_id: BankTransactionId,
    /// What happened to it.
    pub outcome: AutoClassifyOutcome,
}
