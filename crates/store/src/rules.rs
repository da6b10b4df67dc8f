//! Classification rule repository.
//!
//! Rules are append-only: an edit is deactivate-old plus create-new, and
//! deactivation is the only retirement path. There is deliberately no
//! physical delete, so a rule that has classified persisted transactions
//! can always be audited.

use chrono::Utc;
use tracing::info;

use grootboek_core::rules::{ClassificationRule, NewRule, rule_order, validate_new_rule};
use grootboek_shared::types::{BankTransactionId, CompanyId, RuleId};

use crate::{Store, StoreError, StoreResult};

impl Store {
    /// Lists every rule of a company, ordered by priority desc then id asc.
    #[must_use]
    pub fn list_rules(&self, company_id: CompanyId) -> Vec<ClassificationRule> {
        let mut rules: Vec<ClassificationRule> = self
            .rules
            .iter()
            .filter(|r| r.company_id == company_id)
            .map(|r| r.clone())
            .collect();
        rules.sort_by(rule_order);
        rules
    }

    /// Lists the active rules of a company in evaluation order.
    ///
    /// This is the exact order the matcher expects; it is stable across
    /// calls and possibly empty.
    #[must_use]
    pub fn list_active_rules(&self, company_id: CompanyId) -> Vec<ClassificationRule> {
        let mut rules: Vec<ClassificationRule> = self
            .rules
            .iter()
            .filter(|r| r.company_id == company_id && r.active)
            .map(|r| r.clone())
            .collect();
        rules.sort_by(rule_order);
        rules
    }

    /// Creates a rule after validating its fields against the company's
    /// chart of accounts.
    ///
    /// # Errors
    ///
    /// `VALIDATION_ERROR` / `UNKNOWN_ACCOUNT` / `ACCOUNT_INACTIVE` per
    /// rule validation.
    pub fn create_rule(
        &self,
        company_id: CompanyId,
        input: NewRule,
    ) -> StoreResult<ClassificationRule> {
        validate_new_rule(&input, |code| self.account_info(company_id, code))?;
        let rule = ClassificationRule::create(company_id, input, Utc::now());
        info!(
            rule_id = %rule.id,
            company_id = %company_id,
            account_code = %rule.account_code,
            "Classification rule created"
        );
        self.rules.insert(rule.id, rule.clone());
        Ok(rule)
    }

    /// The "make this recurring" path: derives a `Contains` rule from an
    /// existing transaction's description.
    ///
    /// # Errors
    ///
    /// `NOT_FOUND` for a missing transaction, plus rule validation errors.
    pub fn create_rule_from_transaction(
        &self,
        transaction_id: BankTransactionId,
        account_code: &str,
        priority: i32,
    ) -> StoreResult<ClassificationRule> {
        let tx = self
            .transactions
            .get(&transaction_id)
            .map(|t| t.clone())
            .ok_or_else(|| StoreError::not_found("transaction", transaction_id))?;
        let input = NewRule::from_transaction(&tx, account_code, priority);
        self.create_rule(tx.company_id, input)
    }

    /// Deactivates a rule. Deactivating an already-inactive rule is a
    /// no-op that does not touch `deactivated_at` again.
    ///
    /// # Errors
    ///
    /// `NOT_FOUND` when the rule does not exist.
    pub fn deactivate_rule(&self, rule_id: RuleId) -> StoreResult<ClassificationRule> {
        let mut rule = self
            .rules
            .get_mut(&rule_id)
            .ok_or_else(|| StoreError::not_found("rule", rule_id))?;
        if rule.active {
            rule.active = false;
            rule.deactivated_at = Some(Utc::now());
            info!(rule_id = %rule_id, "Classification rule deactivated");
        }
        Ok(rule.clone())
    }
}
