//! Property-based tests for the matcher and classifier.
//!
//! - Matching is deterministic and preserves input order
//! - Matched rules are always a subset of the input
//! - Confidence is always within [0.4, 1.0]

use chrono::Utc;
use proptest::prelude::*;

use super::classifier::suggest;
use super::matcher::matching_rules;
use crate::account::AccountInfo;
use crate::rules::{ClassificationRule, MatchType};
use crate::statement::BankTransaction;
use grootboek_shared::types::{
    BankTransactionId, CompanyId, FiscalPeriodId, Money, RuleId,
};

/// Strategy for non-regex match types.
fn plain_match_type() -> impl Strategy<Value = MatchType> {
    prop_oneof![
        Just(MatchType::Contains),
        Just(MatchType::StartsWith),
        Just(MatchType::EndsWith),
        Just(MatchType::Equals),
    ]
}

/// Strategy for short uppercase words used as descriptions and patterns.
fn word() -> impl Strategy<Value = String> {
    "[A-Z]{2,8}"
}

fn make_rule(match_type: MatchType, match_value: String, priority: i32) -> ClassificationRule {
    ClassificationRule {
        id: RuleId::new(),
        company_id: CompanyId::new(),
        rule_name: match_value.clone(),
        match_type,
        match_value,
        account_code: "8100".to_string(),
        priority,
        active: true,
        created_at: Utc::now(),
        deactivated_at: None,
    }
}

fn make_tx(description: String) -> BankTransaction {
    BankTransaction {
        id: BankTransactionId::new(),
        company_id: CompanyId::new(),
        fiscal_period_id: FiscalPeriodId::new(),
        date: chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        description,
        debit_amount: Money::from_cents(100_00),
        credit_amount: Money::ZERO,
        running_balance: None,
        classified_account_code: None,
    }
}

fn rules_strategy() -> impl Strategy<Value = Vec<ClassificationRule>> {
    prop::collection::vec((plain_match_type(), word(), 0i32..100), 0..10)
        .prop_map(|specs| {
            specs
                .into_iter()
                .map(|(mt, mv, prio)| make_rule(mt, mv, prio))
                .collect()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Matching twice over identical inputs yields identical results.
    #[test]
    fn prop_matcher_is_deterministic(
        description in "[A-Z ]{0,40}",
        rules in rules_strategy(),
    ) {
        let first: Vec<_> = matching_rules(&description, &rules)
            .iter()
            .map(|r| r.id)
            .collect();
        let second: Vec<_> = matching_rules(&description, &rules)
            .iter()
            .map(|r| r.id)
            .collect();
        prop_assert_eq!(first, second);
    }

    /// Matched rules are a subsequence of the input: same relative order,
    /// no rule invented.
    #[test]
    fn prop_matcher_preserves_input_order(
        description in "[A-Z ]{0,40}",
        rules in rules_strategy(),
    ) {
        let matched = matching_rules(&description, &rules);
        let mut cursor = 0usize;
        for rule in matched {
            let position = rules[cursor..]
                .iter()
                .position(|candidate| candidate.id == rule.id);
            prop_assert!(position.is_some(), "matched rule missing from input tail");
            cursor += position.unwrap() + 1;
        }
    }

    /// Any suggestion's confidence lies within [0.4, 1.0].
    #[test]
    fn prop_confidence_within_bounds(
        description in "[A-Z ]{1,40}",
        rules in rules_strategy(),
    ) {
        let lookup = |code: &str| {
            Some(AccountInfo {
                code: code.to_string(),
                name: "Salaries".to_string(),
                is_active: true,
            })
        };
        if let Some(suggestion) = suggest(&make_tx(description), &rules, lookup) {
            prop_assert!(suggestion.confidence >= rust_decimal_macros::dec!(0.4));
            prop_assert!(suggestion.confidence <= rust_decimal_macros::dec!(1.0));
        }
    }

    /// A contains-rule whose value is a substring of the description always
    /// fires.
    #[test]
    fn prop_contains_substring_always_matches(
        prefix in "[A-Z]{0,10}",
        needle in word(),
        suffix in "[A-Z]{0,10}",
    ) {
        let rules = vec![make_rule(MatchType::Contains, needle.clone(), 50)];
        let description = format!("{prefix}{needle}{suffix}");
        prop_assert_eq!(matching_rules(&description, &rules).len(), 1);
    }
}
