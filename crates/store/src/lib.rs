//! In-memory repositories for Grootboek.
//!
//! This crate replaces a SQL repository layer with concurrent in-memory
//! tables. All business rules live in `grootboek-core`; the store wires the
//! core's injected collaborators (account lookup, period status,
//! closed-period locks) to its own tables and owns the single point of
//! serialization: journal posting and reference allocation go through a
//! per-company mutex.

pub mod accounts;
pub mod batch;
pub mod error;
pub mod fiscal;
pub mod journal;
pub mod rules;
pub mod transactions;

pub use error::{StoreError, StoreResult};

use std::sync::{Arc, Mutex};

use dashmap::DashMap;

use grootboek_core::account::{Account, AccountInfo};
use grootboek_core::fiscal::FiscalPeriod;
use grootboek_core::journal::JournalEntry;
use grootboek_core::rules::ClassificationRule;
use grootboek_core::statement::BankTransaction;
use grootboek_shared::types::{
    BankTransactionId, CompanyId, FiscalPeriodId, JournalEntryId, RuleId, UserId,
};

/// The in-memory data store.
///
/// Cheap to clone handles are not provided; callers share it behind an
/// `Arc`. Reads go straight to the `DashMap` tables; journal posting for a
/// company is serialized through [`Store::posting_lock`].
#[derive(Debug, Default)]
pub struct Store {
    /// Accounts keyed by (company, code); code is unique per company.
    pub(crate) accounts: DashMap<(CompanyId, String), Account>,
    /// Fiscal periods by id.
    pub(crate) periods: DashMap<FiscalPeriodId, FiscalPeriod>,
    /// Bank transactions by id.
    pub(crate) transactions: DashMap<BankTransactionId, BankTransaction>,
    /// Classification rules by id.
    pub(crate) rules: DashMap<RuleId, ClassificationRule>,
    /// Posted journal entries by id.
    pub(crate) entries: DashMap<JournalEntryId, JournalEntry>,
    /// Reference uniqueness index, (company, reference) -> entry.
    pub(crate) references: DashMap<(CompanyId, String), JournalEntryId>,
    /// Posted entries that carry a line sourced from a transaction.
    pub(crate) entries_by_transaction: DashMap<BankTransactionId, Vec<JournalEntryId>>,
    /// Per-company posting mutex guarding the reference sequence.
    pub(crate) posting: DashMap<CompanyId, Arc<Mutex<u64>>>,
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the classifier/builder view of an account.
    #[must_use]
    pub fn account_info(&self, company_id: CompanyId, code: &str) -> Option<AccountInfo> {
        self.accounts
            .get(&(company_id, code.to_string()))
            .map(|a| a.info())
    }

    /// Returns the posting mutex for a company, creating it on first use.
    ///
    /// The mutex guards the company's journal-reference sequence; its value
    /// is the last allocated sequence number.
    pub(crate) fn posting_lock(&self, company_id: CompanyId) -> Arc<Mutex<u64>> {
        self.posting
            .entry(company_id)
            .or_insert_with(|| Arc::new(Mutex::new(0)))
            .clone()
    }

    /// The fallback actor recorded on entries when the caller supplies none.
    ///
    /// Nil rather than a fresh v7 so "system" is recognizable in data.
    pub(crate) const fn system_user() -> UserId {
        UserId::from_uuid(uuid::Uuid::nil())
    }
}
