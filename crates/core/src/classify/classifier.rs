//! Classification decisions and confidence scoring.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::ClassifyError;
use super::matcher::matching_rules;
use crate::account::AccountInfo;
use crate::rules::{ClassificationRule, MatchType};
use crate::statement::BankTransaction;
use grootboek_shared::types::BankTransactionId;

/// A classification suggestion for an unclassified transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Suggested ledger account code.
    pub account_code: String,
    /// Suggested ledger account name.
    pub account_name: String,
    /// Heuristic trust score in [0, 1].
    pub confidence: Decimal,
}

/// Computes the confidence score for a winning rule.
///
/// Confidence is a function of match specificity, not of how many rules
/// fired: exact and regex matches are fully trusted, anchored matches
/// slightly less, and a generic contains-match loses a point per additional
/// rule that also fired, floored at 0.4.
fn confidence_for(match_type: MatchType, extra_matches: usize) -> Decimal {
    match match_type {
        MatchType::Equals | MatchType::Regex => dec!(1.0),
        MatchType::StartsWith | MatchType::EndsWith => dec!(0.85),
        MatchType::Contains => {
            let penalty = dec!(0.01) * Decimal::from(extra_matches as u64);
            (dec!(0.7) - penalty).max(dec!(0.4))
        }
    }
}

/// Suggests a classification for a transaction, or `None` when no rule
/// matches.
///
/// The winner is the first rule returned by the matcher - highest priority,
/// then lowest id. Priority is the sole tie-break, by design, so rule
/// authors keep explicit control; there is no best-match scoring among the
/// candidates. Callers must pass `active_rules` in `priority desc, id asc`
/// order (the rule store's order).
#[must_use]
pub fn suggest<A>(
    tx: &BankTransaction,
    active_rules: &[ClassificationRule],
    account_lookup: A,
) -> Option<Suggestion>
where
    A: Fn(&str) -> Option<AccountInfo>,
{
    let matches = matching_rules(&tx.description, active_rules);
    let winner = matches.first()?;

    let Some(account) = account_lookup(&winner.account_code) else {
        warn!(
            rule_id = %winner.id,
            account_code = %winner.account_code,
            "Winning rule references a missing account; no suggestion"
        );
        return None;
    };
    if !account.is_active {
        warn!(
            rule_id = %winner.id,
            account_code = %winner.account_code,
            "Winning rule references an inactive account; no suggestion"
        );
        return None;
    }

    Some(Suggestion {
        account_code: winner.account_code.clone(),
        account_name: account.name,
        confidence: confidence_for(winner.match_type, matches.len().saturating_sub(1)),
    })
}

/// Why a transaction cannot be re-classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReclassifyLock {
    /// A posted entry referencing the transaction sits in a closed period.
    ClosedPeriod,
    /// A posted entry references the transaction in an open period. The
    /// entry must be reversed before the transaction can change account.
    PostedEntry,
}

/// Applies a classification to a transaction.
///
/// Serves both the accept-suggestion and the manual-override path; it never
/// silently no-ops. Re-classification of an already-classified transaction
/// is permitted only while no posted journal entry references it, otherwise
/// every bank line would feed more than one entry into the ledger.
///
/// # Errors
///
/// Returns `ClassifyError::UnknownAccount` / `AccountInactive` for a bad
/// account code, `ClassifyError::PeriodClosed` / `EntryPosted` when the
/// transaction is locked by a prior posting.
pub fn classify<A, G>(
    tx: &mut BankTransaction,
    account_code: &str,
    account_lookup: A,
    reclassify_lock: G,
) -> Result<(), ClassifyError>
where
    A: Fn(&str) -> Option<AccountInfo>,
    G: Fn(BankTransactionId) -> Option<ReclassifyLock>,
{
    let account = account_lookup(account_code)
        .ok_or_else(|| ClassifyError::UnknownAccount(account_code.to_string()))?;
    if !account.is_active {
        return Err(ClassifyError::AccountInactive(account_code.to_string()));
    }

    if tx.is_classified() {
        match reclassify_lock(tx.id) {
            Some(ReclassifyLock::ClosedPeriod) => return Err(ClassifyError::PeriodClosed),
            Some(ReclassifyLock::PostedEntry) => return Err(ClassifyError::EntryPosted),
            None => {}
        }
    }

    tx.classified_account_code = Some(account.code);
    Ok(())
}
