//! Fiscal period repository.

use grootboek_core::fiscal::{FiscalPeriod, FiscalPeriodStatus};
use grootboek_shared::types::FiscalPeriodId;

use crate::{Store, StoreError, StoreResult};

impl Store {
    /// Inserts or replaces a fiscal period.
    pub fn upsert_period(&self, period: FiscalPeriod) -> FiscalPeriod {
        self.periods.insert(period.id, period.clone());
        period
    }

    /// Fetches a fiscal period by id.
    ///
    /// # Errors
    ///
    /// `NOT_FOUND` when the period does not exist.
    pub fn get_period(&self, id: FiscalPeriodId) -> StoreResult<FiscalPeriod> {
        self.periods
            .get(&id)
            .map(|p| p.clone())
            .ok_or_else(|| StoreError::not_found("fiscal period", id))
    }

    /// Closes a fiscal period. Closing an already-closed period is a no-op.
    ///
    /// # Errors
    ///
    /// `NOT_FOUND` when the period does not exist.
    pub fn close_period(&self, id: FiscalPeriodId) -> StoreResult<FiscalPeriod> {
        let mut period = self
            .periods
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("fiscal period", id))?;
        period.status = FiscalPeriodStatus::Closed;
        Ok(period.clone())
    }

    /// Status lookup injected into the consistency checker.
    pub(crate) fn period_status(&self, id: FiscalPeriodId) -> Option<FiscalPeriodStatus> {
        self.periods.get(&id).map(|p| p.status)
    }
}
