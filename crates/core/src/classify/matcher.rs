//! Pure rule matching against transaction descriptions.

use regex::Regex;
use tracing::warn;

use crate::rules::{ClassificationRule, MatchType};

/// Returns every active rule whose pattern matches the description,
/// preserving the order of the input slice (the matcher never re-sorts;
/// callers pass rules in `priority desc, id asc` order).
///
/// Comparisons are against the upper-cased description with an upper-cased
/// match value, except `Regex`, which is compiled as given and tested
/// against the raw description. An invalid regex pattern skips that single
/// rule (logged) rather than aborting the whole pass.
#[must_use]
pub fn matching_rules<'a>(
    description: &str,
    rules: &'a [ClassificationRule],
) -> Vec<&'a ClassificationRule> {
    let upper = description.to_uppercase();
    rules
        .iter()
        .filter(|rule| rule_matches(rule, description, &upper))
        .collect()
}

fn rule_matches(rule: &ClassificationRule, raw: &str, upper: &str) -> bool {
    match rule.match_type {
        MatchType::Contains => upper.contains(&rule.match_value.to_uppercase()),
        MatchType::StartsWith => upper.starts_with(&rule.match_value.to_uppercase()),
        MatchType::EndsWith => upper.ends_with(&rule.match_value.to_uppercase()),
        MatchType::Equals => upper.trim() == rule.match_value.to_uppercase().trim(),
        MatchType::Regex => match Regex::new(&rule.match_value) {
            Ok(regex) => regex.is_match(raw),
            Err(error) => {
                warn!(
                    rule_id = %rule.id,
                    pattern = %rule.match_value,
                    %error,
                    "Skipping rule with invalid regex pattern"
                );
                false
            }
        },
    }
}
