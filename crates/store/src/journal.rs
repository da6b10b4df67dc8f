//! Journal entry repository and the posting serialization point.
//!
//! Posting takes the company's mutex, allocates or checks the entry
//! reference, and only then writes. Everything before posting (building,
//! validation) runs lock-free on values owned by the caller, so a rejected
//! entry never touches persisted state.

use tracing::info;

use grootboek_core::classify::ReclassifyLock;
use grootboek_core::journal::{EntryStatus, JournalEntry, JournalError, verify_persisted};
use grootboek_shared::AppError;
use grootboek_shared::types::{
    BankTransactionId, CompanyId, FiscalPeriodId, JournalEntryId, PageRequest, PageResponse,
};

use crate::{Store, StoreError, StoreResult};

impl Store {
    /// Posts a validated entry: allocates (or checks) its reference under
    /// the company's posting mutex, marks it `Posted` and persists it.
    ///
    /// # Errors
    ///
    /// `DUPLICATE_REFERENCE` when a caller-supplied reference is already
    /// taken for the company.
    pub(crate) fn post_entry(&self, mut entry: JournalEntry) -> StoreResult<JournalEntry> {
        if entry.status != EntryStatus::Validated {
            return Err(StoreError::App(AppError::Internal(
                "attempted to post an unvalidated entry".to_string(),
            )));
        }

        let lock = self.posting_lock(entry.company_id);
        let mut sequence = lock
            .lock()
            .map_err(|_| AppError::Internal("posting lock poisoned".to_string()))?;

        let reference = match entry.reference.take() {
            Some(reference) => {
                if self
                    .references
                    .contains_key(&(entry.company_id, reference.clone()))
                {
                    return Err(JournalError::DuplicateReference(reference).into());
                }
                reference
            }
            None => {
                // Skip over caller-supplied references shaped like ours.
                let mut next = *sequence + 1;
                while self
                    .references
                    .contains_key(&(entry.company_id, format!("JE-{next}")))
                {
                    next += 1;
                }
                *sequence = next;
                format!("JE-{next}")
            }
        };

        entry.reference = Some(reference.clone());
        entry.status = EntryStatus::Posted;

        self.references
            .insert((entry.company_id, reference.clone()), entry.id);
        for line in &entry.lines {
            if let Some(tx_id) = line.source_transaction_id {
                self.entries_by_transaction
                    .entry(tx_id)
                    .or_default()
                    .push(entry.id);
            }
        }
        self.entries.insert(entry.id, entry.clone());
        drop(sequence);

        info!(
            entry_id = %entry.id,
            company_id = %entry.company_id,
            reference = %reference,
            lines = entry.lines.len(),
            "Journal entry posted"
        );
        Ok(entry)
    }

    /// Fetches a posted journal entry, re-checking the balance invariant.
    ///
    /// # Errors
    ///
    /// `NOT_FOUND` for a missing entry, `LEDGER_CORRUPTION` when the
    /// persisted entry no longer balances.
    pub fn get_journal_entry(&self, id: JournalEntryId) -> StoreResult<JournalEntry> {
        let entry = self
            .entries
            .get(&id)
            .map(|e| e.clone())
            .ok_or_else(|| StoreError::not_found("journal entry", id))?;
        verify_persisted(&entry)?;
        Ok(entry)
    }

    /// Pages through a fiscal period's posted entries in creation order.
    ///
    /// # Errors
    ///
    /// `LEDGER_CORRUPTION` when any returned entry no longer balances.
    pub fn list_journal_entries(
        &self,
        company_id: CompanyId,
        period_id: FiscalPeriodId,
        page: &PageRequest,
    ) -> StoreResult<PageResponse<JournalEntry>> {
        let mut entries: Vec<JournalEntry> = self
            .entries
            .iter()
            .filter(|e| e.company_id == company_id && e.fiscal_period_id == period_id)
            .map(|e| e.clone())
            .collect();
        entries.sort_by_key(|e| e.id);

        let response = PageResponse::from_items(entries, page);
        for entry in &response.items {
            verify_persisted(entry)?;
        }
        Ok(response)
    }

    /// Whether a posted entry referencing the transaction blocks its
    /// re-classification, and on which ground. A closed-period posting
    /// takes precedence; any other posting still locks the transaction
    /// until the entry is reversed.
    pub(crate) fn reclassify_lock(&self, tx_id: BankTransactionId) -> Option<ReclassifyLock> {
        let entry_ids = self.entries_by_transaction.get(&tx_id)?;
        if entry_ids.is_empty() {
            return None;
        }
        let in_closed_period = entry_ids.iter().any(|entry_id| {
            self.entries.get(entry_id).is_some_and(|entry| {
                self.period_status(entry.fiscal_period_id)
                    .is_some_and(|status| !status.allows_posting())
            })
        });
        if in_closed_period {
            Some(ReclassifyLock::ClosedPeriod)
        } else {
            Some(ReclassifyLock::PostedEntry)
        }
    }
}
