//! Business rule validation for classification rules.

use thiserror::Error;

use super::types::NewRule;
use crate::account::AccountInfo;

/// Validation errors for rule creation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleValidationError {
    /// A required field is blank.
    #[error("Field '{0}' must not be blank")]
    BlankField(&'static str),

    /// The target account does not exist for the company.
    #[error("Account '{0}' does not exist")]
    UnknownAccount(String),

    /// The target account exists but is inactive.
    #[error("Account '{0}' is inactive and cannot receive postings")]
    InactiveAccount(String),
}

impl RuleValidationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::BlankField(_) => "VALIDATION_ERROR",
            Self::UnknownAccount(_) => "UNKNOWN_ACCOUNT",
            Self::InactiveAccount(_) => "ACCOUNT_INACTIVE",
        }
    }
}

/// Validates a new rule against the company's chart of accounts.
///
/// # Errors
///
/// Returns `RuleValidationError` if a required field is blank or if the
/// target account is missing or inactive.
pub fn validate_new_rule<A>(input: &NewRule, account_lookup: A) -> Result<(), RuleValidationError>
where
    A: Fn(&str) -> Option<AccountInfo>,
{
    if input.rule_name.trim().is_empty() {
        return Err(RuleValidationError::BlankField("rule_name"));
    }
    if input.match_value.trim().is_empty() {
        return Err(RuleValidationError::BlankField("match_value"));
    }
    if input.account_code.trim().is_empty() {
        return Err(RuleValidationError::BlankField("account_code"));
    }

    let account = account_lookup(&input.account_code)
        .ok_or_else(|| RuleValidationError::UnknownAccount(input.account_code.clone()))?;
    if !account.is_active {
        return Err(RuleValidationError::InactiveAccount(input.account_code.clone()));
    }

    Ok(())
}
