//! Fiscal period types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use grootboek_shared::types::{CompanyId, FiscalPeriodId};

/// Status of a fiscal period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FiscalPeriodStatus {
    /// Period is open for postings.
    Open,
    /// Period is closed, the ledger for it is immutable.
    Closed,
}

impl FiscalPeriodStatus {
    /// Returns true if the period allows postings.
    #[must_use]
    pub fn allows_posting(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// A bounded accounting interval (e.g. a tax year).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalPeriod {
    /// Unique identifier.
    pub id: FiscalPeriodId,
    /// Company this period belongs to.
    pub company_id: CompanyId,
    /// Period name (e.g. "FY2026").
    pub name: String,
    /// Start date of the period.
    pub start_date: NaiveDate,
    /// End date of the period.
    pub end_date: NaiveDate,
    /// Current status.
    pub status: FiscalPeriodStatus,
}

impl FiscalPeriod {
    /// Returns true if postings to this period are allowed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == FiscalPeriodStatus::Open
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_period(status: FiscalPeriodStatus) -> FiscalPeriod {
        FiscalPeriod {
            id: FiscalPeriodId::new(),
            company_id: CompanyId::new(),
            name: "FY2026".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
            status,
        }
    }

    #[test]
    fn test_open_period_allows_posting() {
        assert!(make_period(FiscalPeriodStatus::Open).is_open());
        assert!(FiscalPeriodStatus::Open.allows_posting());
    }

    #[test]
    fn test_closed_period_blocks_posting() {
        assert!(!make_period(FiscalPeriodStatus::Closed).is_open());
        assert!(!FiscalPeriodStatus::Closed.allows_posting());
    }

    #[test]
    fn test_contains_date() {
        let period = make_period(FiscalPeriodStatus::Open);
        assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()));
        assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()));
        assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()));
    }
}
