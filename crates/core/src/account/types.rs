//! Chart-of-accounts domain types.
//!
//! Account codes follow the leading-digit convention: the first digit of the
//! code determines the account category and therefore its normal side.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use grootboek_shared::types::{AccountId, CompanyId};

/// The side on which an account's balance conventionally increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalSide {
    /// Balance increases with debits (assets, expenses).
    Debit,
    /// Balance increases with credits (liabilities, equity, income).
    Credit,
}

/// An account code that does not follow the leading-digit convention.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid account code '{0}': must start with a digit 1-9")]
pub struct InvalidAccountCode(pub String);

impl NormalSide {
    /// Derives the normal side from the leading digit of an account code.
    ///
    /// 1 = Asset (debit), 2 = Liability (credit), 3 = Equity (credit),
    /// 4-6 = Income (credit), 7-9 = Expense (debit).
    ///
    /// # Errors
    ///
    /// Returns `InvalidAccountCode` if the code does not start with 1-9.
    pub fn for_code(code: &str) -> Result<Self, InvalidAccountCode> {
        match code.chars().next() {
            Some('1' | '7' | '8' | '9') => Ok(Self::Debit),
            Some('2'..='6') => Ok(Self::Credit),
            _ => Err(InvalidAccountCode(code.to_string())),
        }
    }
}

/// A chart-of-accounts entry.
///
/// `code` uniquely identifies the account within its company. An inactive
/// account may not receive new postings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Company this account belongs to.
    pub company_id: CompanyId,
    /// Account code, unique per company (e.g. "4100").
    pub code: String,
    /// Account name.
    pub name: String,
    /// Side on which this account's balance increases.
    pub normal_side: NormalSide,
    /// Whether the account may receive new postings.
    pub active: bool,
}

impl Account {
    /// Creates an account, deriving the normal side from the code.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAccountCode` if the code does not start with 1-9.
    pub fn new(
        company_id: CompanyId,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, InvalidAccountCode> {
        let code = code.into();
        let normal_side = NormalSide::for_code(&code)?;
        Ok(Self {
            id: AccountId::new(),
            company_id,
            code,
            name: name.into(),
            normal_side,
            active: true,
        })
    }

    /// Returns the lookup view of this account.
    #[must_use]
    pub fn info(&self) -> AccountInfo {
        AccountInfo {
            code: self.code.clone(),
            name: self.name.clone(),
            is_active: self.active,
        }
    }
}

/// Information about an account needed by the classifier and builder.
///
/// This is the view returned by injected account-lookup closures; services
/// never hold a reference to the full chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    /// The account code.
    pub code: String,
    /// The account name.
    pub name: String,
    /// Whether the account is active.
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("1000", NormalSide::Debit)] // asset
    #[case("2100", NormalSide::Credit)] // liability
    #[case("3000", NormalSide::Credit)] // equity
    #[case("4100", NormalSide::Credit)] // income
    #[case("5000", NormalSide::Credit)]
    #[case("6200", NormalSide::Credit)]
    #[case("7000", NormalSide::Debit)] // expense
    #[case("8100", NormalSide::Debit)]
    #[case("9999", NormalSide::Debit)]
    fn test_normal_side_for_code(#[case] code: &str, #[case] expected: NormalSide) {
        assert_eq!(NormalSide::for_code(code).unwrap(), expected);
    }

    #[test]
    fn test_invalid_account_code() {
        assert!(NormalSide::for_code("0100").is_err());
        assert!(NormalSide::for_code("X100").is_err());
        assert!(NormalSide::for_code("").is_err());
    }

    #[test]
    fn test_account_new_derives_normal_side() {
        let company = CompanyId::new();
        let account = Account::new(company, "8100", "Salaries").unwrap();
        assert_eq!(account.normal_side, NormalSide::Debit);
        assert!(account.active);
        assert_eq!(account.info().name, "Salaries");
    }
}
