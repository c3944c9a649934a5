//! # Cash Transaction Repository
//!
//! Manual movements of money in and out of the till: the opening float,
//! top-ups, withdrawals. Amounts are signed.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::repository::filter_by_range;
use crate::store::StoreInner;
use pdv_core::validation::validate_cash_transaction;
use pdv_core::{CashTransaction, DateRange, NewCashTransaction};

/// Repository for cash transactions.
#[derive(Debug, Clone)]
pub struct CashTransactionRepository {
    inner: Arc<StoreInner>,
}

impl CashTransactionRepository {
    pub(crate) fn new(inner: Arc<StoreInner>) -> Self {
        CashTransactionRepository { inner }
    }

    /// Records a cash movement.
    ///
    /// ## Errors
    /// - `Domain` for a zero amount or oversized notes
    /// - `ForeignKeyViolation` if `operator_id` does not exist
    pub async fn create(&self, input: NewCashTransaction) -> StoreResult<CashTransaction> {
        let input = validate_cash_transaction(&input)?;

        let mut tables = self.inner.tables.write().await;
        if !tables.has_user(input.operator_id) {
            return Err(StoreError::dangling("operatorId", input.operator_id));
        }

        let id = self.inner.ids.cash_transactions.next_id();
        debug!(id, amount = %input.amount, reason = ?input.reason, "Inserting cash transaction");

        let tx = CashTransaction {
            id,
            amount: input.amount,
            reason: input.reason,
            notes: input.notes,
            operator_id: input.operator_id,
            created_at: Utc::now(),
        };
        tables.cash_transactions.insert(id, tx.clone());

        info!(id, amount = %tx.amount, operator_id = tx.operator_id, "Cash transaction recorded");
        Ok(tx)
    }

    pub async fn get_by_id(&self, id: i64) -> StoreResult<Option<CashTransaction>> {
        Ok(self
            .inner
            .tables
            .read()
            .await
            .cash_transactions
            .get(&id)
            .cloned())
    }

    pub async fn list_all(&self) -> StoreResult<Vec<CashTransaction>> {
        Ok(self
            .inner
            .tables
            .read()
            .await
            .cash_transactions
            .values()
            .cloned()
            .collect())
    }

    pub async fn list_by_date_range(&self, range: DateRange) -> StoreResult<Vec<CashTransaction>> {
        let tables = self.inner.tables.read().await;
        Ok(filter_by_range(&tables.cash_transactions, &range, |tx| {
            tx.created_at
        }))
    }
}
