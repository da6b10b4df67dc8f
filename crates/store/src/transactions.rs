//! Bank transaction repository and the classify-to-post flow.
//!
//! Classification, entry construction and validation all run on a clone of
//! the stored transaction; the stored row is only updated after the entry
//! has been posted. A failure anywhere leaves both the transaction and the
//! journal untouched.

use chrono::Utc;

use grootboek_core::classify::{Suggestion, classify, suggest};
use grootboek_core::journal::{
    JournalEntry, JournalError, SplitLine, build_entry, build_split_entry, run_checks,
};
use grootboek_core::statement::BankTransaction;
use grootboek_shared::types::{BankTransactionId, CompanyId, FiscalPeriodId, UserId};

use crate::{Store, StoreError, StoreResult};

impl Store {
    /// Ingests a bank-statement transaction.
    ///
    /// # Errors
    ///
    /// `MALFORMED_TRANSACTION` for a bad debit/credit shape, `NOT_FOUND`
    /// when the fiscal period does not exist.
    pub fn insert_transaction(&self, tx: BankTransaction) -> StoreResult<BankTransaction> {
        tx.validate()?;
        let period = self.get_period(tx.fiscal_period_id)?;
        if period.company_id != tx.company_id {
            return Err(StoreError::not_found("fiscal period", tx.fiscal_period_id));
        }
        self.transactions.insert(tx.id, tx.clone());
        Ok(tx)
    }

    /// Fetches a transaction by id.
    ///
    /// # Errors
    ///
    /// `NOT_FOUND` when the transaction does not exist.
    pub fn get_transaction(&self, id: BankTransactionId) -> StoreResult<BankTransaction> {
        self.transactions
            .get(&id)
            .map(|t| t.clone())
            .ok_or_else(|| StoreError::not_found("transaction", id))
    }

    /// Lists a period's unclassified transactions with the classifier's
    /// suggestion for each, oldest first.
    #[must_use]
    pub fn unclassified_transactions(
        &self,
        company_id: CompanyId,
        period_id: FiscalPeriodId,
    ) -> Vec<(BankTransaction, Option<Suggestion>)> {
        let rules = self.list_active_rules(company_id);
        let mut txs: Vec<BankTransaction> = self
            .transactions
            .iter()
            .filter(|t| {
                t.company_id == company_id
                    && t.fiscal_period_id == period_id
                    && !t.is_classified()
            })
            .map(|t| t.clone())
            .collect();
        txs.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

        txs.into_iter()
            .map(|tx| {
                let suggestion = suggest(&tx, &rules, |code| self.account_info(company_id, code));
                (tx, suggestion)
            })
            .collect()
    }

    /// Classifies a transaction into one account and posts the resulting
    /// two-line journal entry.
    ///
    /// Serves both accept-suggestion and manual override; the account code
    /// is always the caller's, never re-derived from the rules.
    ///
    /// # Errors
    ///
    /// Classification errors (`UNKNOWN_ACCOUNT`, `ACCOUNT_INACTIVE`,
    /// `PERIOD_CLOSED`, and `CANNOT_MODIFY_POSTED` when a posted entry
    /// already references the transaction) and any journal
    /// construction/validation error.
    pub fn classify_transaction(
        &self,
        transaction_id: BankTransactionId,
        account_code: &str,
        bank_account_code: &str,
        created_by: Option<UserId>,
        reference: Option<String>,
    ) -> StoreResult<JournalEntry> {
        let mut tx = self.get_transaction(transaction_id)?;
        let company_id = tx.company_id;

        classify(
            &mut tx,
            account_code,
            |code| self.account_info(company_id, code),
            |id| self.reclassify_lock(id),
        )?;

        let entry = build_entry(
            &tx,
            bank_account_code,
            created_by.unwrap_or_else(Self::system_user),
            reference,
            |code| self.account_info(company_id, code),
            Utc::now(),
        )?;
        self.finish_posting(tx, entry)
    }

    /// Classifies a transaction across several accounts and posts the
    /// resulting split entry. The splits must sum exactly to the
    /// transaction amount.
    ///
    /// # Errors
    ///
    /// `SPLIT_MISMATCH` when the splits do not cover the amount, plus the
    /// same errors as [`Store::classify_transaction`].
    pub fn classify_transaction_split(
        &self,
        transaction_id: BankTransactionId,
        splits: &[SplitLine],
        bank_account_code: &str,
        created_by: Option<UserId>,
        reference: Option<String>,
    ) -> StoreResult<JournalEntry> {
        let mut tx = self.get_transaction(transaction_id)?;
        let company_id = tx.company_id;

        // The first split carries the headline classification; the split
        // lines themselves keep the full breakdown.
        let first = splits.first().ok_or(JournalError::EmptySplit)?;
        classify(
            &mut tx,
            &first.account_code,
            |code| self.account_info(company_id, code),
            |id| self.reclassify_lock(id),
        )?;

        let entry = build_split_entry(
            &tx,
            bank_account_code,
            splits,
            created_by.unwrap_or_else(Self::system_user),
            reference,
            |code| self.account_info(company_id, code),
            Utc::now(),
        )?;
        self.finish_posting(tx, entry)
    }

    /// Validates and posts a constructed entry, then writes the classified
    /// transaction back. Ordering matters: the transaction row is only
    /// updated once the entry is durably posted.
    fn finish_posting(
        &self,
        tx: BankTransaction,
        mut entry: JournalEntry,
    ) -> StoreResult<JournalEntry> {
        run_checks(
            &mut entry,
            |id| self.period_status(id),
            |id| self.transactions.get(&id).map(|t| t.fiscal_period_id),
        )?;
        let posted = self.post_entry(entry)?;
        self.transactions.insert(tx.id, tx);
        Ok(posted)
    }
}
