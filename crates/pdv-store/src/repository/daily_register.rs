//! # Daily Register Repository
//!
//! Read access to close-of-day records. Records are only created through
//! [`crate::RegisterService::close`], which computes them from the ledger.

use std::sync::Arc;

use crate::error::StoreResult;
use crate::repository::filter_by_range;
use crate::store::StoreInner;
use pdv_core::{DailyRegister, DateRange};

/// Repository for close-of-day records.
#[derive(Debug, Clone)]
pub struct DailyRegisterRepository {
    inner: Arc<StoreInner>,
}

impl DailyRegisterRepository {
    pub(crate) fn new(inner: Arc<StoreInner>) -> Self {
        DailyRegisterRepository { inner }
    }

    pub async fn get_by_id(&self, id: i64) -> StoreResult<Option<DailyRegister>> {
        Ok(self
            .inner
            .tables
            .read()
            .await
            .daily_registers
            .get(&id)
            .cloned())
    }

    pub async fn list_all(&self) -> StoreResult<Vec<DailyRegister>> {
        Ok(self
            .inner
            .tables
            .read()
            .await
            .daily_registers
            .values()
            .cloned()
            .collect())
    }

    /// Closings whose `closed_at` falls within the range (inclusive).
    pub async fn list_by_date_range(&self, range: DateRange) -> StoreResult<Vec<DailyRegister>> {
        let tables = self.inner.tables.read().await;
        Ok(filter_by_range(&tables.daily_registers, &range, |r| {
            r.closed_at
        }))
    }
}
