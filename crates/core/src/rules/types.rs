//! Classification rule domain types.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::statement::BankTransaction;
use grootboek_shared::types::{CompanyId, RuleId};

/// How a rule's `match_value` is compared against a transaction description.
///
/// All comparisons are case-insensitive except `Regex`, which is applied as
/// given against the raw description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Match value is a substring of the description.
    Contains,
    /// Description starts with the match value.
    StartsWith,
    /// Description ends with the match value.
    EndsWith,
    /// Description equals the match value after trimming whitespace.
    Equals,
    /// Match value is a regular expression tested against the raw description.
    Regex,
}

/// A reusable pattern-to-account mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRule {
    /// Unique identifier (UUID v7 - ordered by creation time).
    pub id: RuleId,
    /// Company this rule belongs to.
    pub company_id: CompanyId,
    /// Human-readable rule name.
    pub rule_name: String,
    /// How the match value is compared.
    pub match_type: MatchType,
    /// The pattern to match.
    pub match_value: String,
    /// Ledger account the rule classifies into.
    pub account_code: String,
    /// Evaluation priority; higher priorities are evaluated first.
    pub priority: i32,
    /// Whether the rule participates in matching.
    pub active: bool,
    /// When the rule was created.
    pub created_at: DateTime<Utc>,
    /// When the rule was deactivated, if it has been.
    pub deactivated_at: Option<DateTime<Utc>>,
}

/// Input for creating a classification rule.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRule {
    /// Human-readable rule name.
    pub rule_name: String,
    /// How the match value is compared.
    pub match_type: MatchType,
    /// The pattern to match.
    pub match_value: String,
    /// Ledger account the rule classifies into.
    pub account_code: String,
    /// Evaluation priority; higher priorities are evaluated first.
    pub priority: i32,
}

impl NewRule {
    /// The "generate rule from transaction" path: derives a `Contains` rule
    /// from a transaction's trimmed description.
    ///
    /// `Contains` rather than `Equals`, so the rule keeps firing when the
    /// bank appends a varying reference number to the same payee text.
    #[must_use]
    pub fn from_transaction(
        tx: &BankTransaction,
        account_code: impl Into<String>,
        priority: i32,
    ) -> Self {
        let description = tx.description.trim().to_string();
        Self {
            rule_name: format!("Auto: {description}"),
            match_type: MatchType::Contains,
            match_value: description,
            account_code: account_code.into(),
            priority,
        }
    }
}

impl ClassificationRule {
    /// Materializes a validated `NewRule` into a rule record.
    #[must_use]
    pub fn create(company_id: CompanyId, input: NewRule, now: DateTime<Utc>) -> Self {
        Self {
            id: RuleId::new(),
            company_id,
            rule_name: input.rule_name,
            match_type: input.match_type,
            match_value: input.match_value,
            account_code: input.account_code,
            priority: input.priority,
            active: true,
            created_at: now,
            deactivated_at: None,
        }
    }
}

/// The strict total order among a company's rules: priority descending, then
/// id ascending (UUID v7, so the earliest-created rule wins a priority tie).
#[must_use]
pub fn rule_order(a: &ClassificationRule, b: &ClassificationRule) -> Ordering {
    b.priority.cmp(&a.priority).then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use grootboek_shared::types::{BankTransactionId, FiscalPeriodId, Money};

    fn make_rule(priority: i32) -> ClassificationRule {
        ClassificationRule::create(
            CompanyId::new(),
            NewRule {
                rule_name: "Salaries".to_string(),
                match_type: MatchType::Contains,
                match_value: "SALARY".to_string(),
                account_code: "8100".to_string(),
                priority,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_higher_priority_sorts_first() {
        let low = make_rule(10);
        let high = make_rule(60);
        assert_eq!(rule_order(&high, &low), Ordering::Less);
        assert_eq!(rule_order(&low, &high), Ordering::Greater);
    }

    #[test]
    fn test_equal_priority_earlier_id_sorts_first() {
        let first = make_rule(50);
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = make_rule(50);
        assert_eq!(rule_order(&first, &second), Ordering::Less);
    }

    #[test]
    fn test_rule_from_transaction_is_contains() {
        let tx = BankTransaction {
            id: BankTransactionId::new(),
            company_id: CompanyId::new(),
            fiscal_period_id: FiscalPeriodId::new(),
            date: chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            description: "  ESKOM ELECTRICITY  ".to_string(),
            debit_amount: Money::from_cents(1_200_00),
            credit_amount: Money::ZERO,
            running_balance: None,
            classified_account_code: None,
        };
        let rule = NewRule::from_transaction(&tx, "8400", 50);
        assert_eq!(rule.match_type, MatchType::Contains);
        assert_eq!(rule.match_value, "ESKOM ELECTRICITY");
        assert_eq!(rule.rule_name, "Auto: ESKOM ELECTRICITY");
    }
}
