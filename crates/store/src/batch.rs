//! Bulk auto-classification.
//!
//! The run snapshots the active rule set, plans every unclassified
//! transaction in parallel, then persists the planned entries one at a
//! time. Rule mutations during a running batch do not affect it, and a
//! failing transaction is recorded in its result row without aborting the
//! rest. Entries already posted when a later transaction fails stay
//! posted; there is no batch rollback.

use tracing::{debug, info};

use grootboek_core::batch::{AutoClassifyOutcome, AutoClassifyResult, plan_batch};
use grootboek_core::statement::BankTransaction;
use grootboek_shared::AppError;
use grootboek_shared::types::{CompanyId, UserId};

use crate::{Store, StoreError, StoreResult};

impl Store {
    /// Runs an auto-classification pass over a company's unclassified
    /// transactions.
    ///
    /// # Errors
    ///
    /// `VALIDATION_ERROR` when the number of unclassified transactions
    /// exceeds `max_batch_size`. Per-transaction failures never error the
    /// run; they land in the result rows.
    pub fn auto_classify(
        &self,
        company_id: CompanyId,
        bank_account_code: &str,
        created_by: Option<UserId>,
        max_batch_size: usize,
    ) -> StoreResult<Vec<AutoClassifyResult>> {
        let transactions: Vec<BankTransaction> = self
            .transactions
            .iter()
            .filter(|t| t.company_id == company_id && !t.is_classified())
            .map(|t| t.clone())
            .collect();
        if transactions.len() > max_batch_size {
            return Err(StoreError::App(AppError::Validation(format!(
                "batch of {} transactions exceeds the maximum of {max_batch_size}",
                transactions.len()
            ))));
        }

        let rules = self.list_active_rules(company_id);
        info!(
            company_id = %company_id,
            transactions = transactions.len(),
            rules = rules.len(),
            "Auto-classification batch started"
        );

        let plans = plan_batch(&transactions, &rules, |code| {
            self.account_info(company_id, code)
        });

        let results: Vec<AutoClassifyResult> = plans
            .into_iter()
            .map(|plan| {
                let outcome = match plan.suggestion {
                    None => AutoClassifyOutcome::NoMatch,
                    Some(suggestion) => {
                        match self.classify_transaction(
                            plan.transaction_id,
                            &suggestion.account_code,
                            bank_account_code,
                            created_by,
                            None,
                        ) {
                            Ok(entry) => AutoClassifyOutcome::Classified {
                                journal_entry_id: entry.id,
                                account_code: suggestion.account_code,
                                confidence: suggestion.confidence,
                            },
                            Err(error) => {
                                debug!(
                                    transaction_id = %plan.transaction_id,
                                    error = %error,
                                    "Auto-classification failed for transaction"
                                );
                                AutoClassifyOutcome::Failed {
                                    code: error.error_code().to_string(),
                                    message: error.to_string(),
                                }
                            }
                        }
                    }
                };
                AutoClassifyResult {
                    transaction_id: plan.transaction_id,
                    outcome,
                }
            })
            .collect();

        let classified = results
            .iter()
            .filter(|r| matches!(r.outcome, AutoClassifyOutcome::Classified { .. }))
            .count();
        info!(
            company_id = %company_id,
            classified,
            total = results.len(),
            "Auto-classification batch finished"
        );
        Ok(results)
    }
}
