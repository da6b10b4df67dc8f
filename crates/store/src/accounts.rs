//! Chart of accounts repository.

use grootboek_core::account::Account;
use grootboek_shared::AppError;
use grootboek_shared::types::CompanyId;

use crate::{Store, StoreError, StoreResult};

impl Store {
    /// Inserts an account, deriving its normal side from the code.
    ///
    /// # Errors
    ///
    /// `INVALID_ACCOUNT_CODE` for a code outside the 1-9 numbering
    /// convention, `CONFLICT` when the code is already taken for the
    /// company.
    pub fn insert_account(
        &self,
        company_id: CompanyId,
        code: &str,
        name: &str,
    ) -> StoreResult<Account> {
        let account = Account::new(company_id, code, name)?;
        let key = (company_id, account.code.clone());
        if self.accounts.contains_key(&key) {
            return Err(StoreError::App(AppError::Conflict(format!(
                "account code {code} already exists"
            ))));
        }
        self.accounts.insert(key, account.clone());
        Ok(account)
    }

    /// Fetches an account by company and code.
    ///
    /// # Errors
    ///
    /// `NOT_FOUND` when the account does not exist.
    pub fn get_account(&self, company_id: CompanyId, code: &str) -> StoreResult<Account> {
        self.accounts
            .get(&(company_id, code.to_string()))
            .map(|a| a.clone())
            .ok_or_else(|| StoreError::not_found("account", code))
    }

    /// Activates or deactivates an account.
    ///
    /// Deactivation does not touch existing postings; it only blocks new
    /// ones.
    ///
    /// # Errors
    ///
    /// `NOT_FOUND` when the account does not exist.
    pub fn set_account_active(
        &self,
        company_id: CompanyId,
        code: &str,
        active: bool,
    ) -> StoreResult<Account> {
        let mut account = self
            .accounts
            .get_mut(&(company_id, code.to_string()))
            .ok_or_else(|| StoreError::not_found("account", code))?;
        account.active = active;
        Ok(account.clone())
    }
}
