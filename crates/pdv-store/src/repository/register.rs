//! # Register Service
//!
//! Summary and close-of-day, which read the sale and cash tables together.
//!
//! ## Close Under One Lock
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  close(request)                                                         │
//! │                                                                         │
//! │  write lock ───────────────────────────────────────────────┐            │
//! │    │                                                        │            │
//! │    ├── operator exists?                                     │            │
//! │    ├── RegisterSummary::compute(all sales, all cash txs)    │ no other   │
//! │    ├── plan_closing(summary, request)                       │ writer can │
//! │    └── insert DailyRegister                                 │ interleave │
//! │                                                             │            │
//! │  unlock ◄──────────────────────────────────────────────────┘            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two concurrent closings therefore see each other's effects in order, and a
//! sale recorded "during" a close lands either entirely before or entirely
//! after it.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::store::{StoreInner, Tables};
use pdv_core::{plan_closing, CloseRegisterRequest, DailyRegister, RegisterSummary};

/// Register summary and close-of-day.
#[derive(Debug, Clone)]
pub struct RegisterService {
    inner: Arc<StoreInner>,
}

impl RegisterService {
    pub(crate) fn new(inner: Arc<StoreInner>) -> Self {
        RegisterService { inner }
    }

    /// Recomputes the summary from the full history.
    pub async fn summary(&self) -> StoreResult<RegisterSummary> {
        let tables = self.inner.tables.read().await;
        summarize(&tables)
    }

    /// Closes the register against a manual cash count.
    ///
    /// ## Errors
    /// - `ForeignKeyViolation` if `operator_id` does not exist
    /// - `Domain(DifferenceReasonRequired)` for an unexplained difference
    /// - `Domain(Validation)` for a negative or oversized count
    /// - `Domain(AmountOverflow)` if the history cannot be summed
    pub async fn close(&self, request: CloseRegisterRequest) -> StoreResult<DailyRegister> {
        let mut tables = self.inner.tables.write().await;

        if !tables.has_user(request.operator_id) {
            return Err(StoreError::dangling("operatorId", request.operator_id));
        }

        let summary = summarize(&tables)?;
        debug!(
            system_balance = %summary.system_balance,
            counted = %request.closing_balance,
            "Closing register"
        );

        let closing = plan_closing(&summary, &request)?;
        if let Some(difference) = closing.difference {
            warn!(
                %difference,
                reason = closing.difference_reason.as_deref().unwrap_or_default(),
                operator_id = closing.operator_id,
                "Register closed with a cash difference"
            );
        }

        let id = self.inner.ids.daily_registers.next_id();
        let record = closing.into_record(id, Utc::now());
        tables.daily_registers.insert(id, record.clone());

        info!(
            id,
            system_balance = %record.system_balance,
            closing_balance = %record.closing_balance,
            "Register closed"
        );
        Ok(record)
    }
}

fn summarize(tables: &Tables) -> StoreResult<RegisterSummary> {
    Ok(RegisterSummary::compute(
        tables.sales.values(),
        tables.cash_transactions.values(),
    )?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Store, StoreError};
    use pdv_core::{
        CashReason, CloseRegisterRequest, CoreError, Money, NewCashTransaction, NewSale, NewUser,
        PaymentMethod, Quantity, SaleItem, MAX_AMOUNT,
    };

    /// One operator, a 100.00 opening float and a 9.00 cash sale.
    async fn opening_day() -> Store {
        let store = Store::new();
        store
            .users()
            .create(NewUser {
                username: "vendedor".into(),
                password_hash: "hash".into(),
                name: "João Vendedor".into(),
                is_admin: false,
            })
            .await
            .unwrap();
        store
            .cash_transactions()
            .create(NewCashTransaction {
                amount: Money::from_cents(10000),
                reason: CashReason::Opening,
                notes: None,
                operator_id: 1,
            })
            .await
            .unwrap();
        store.sales().create(sale(PaymentMethod::Cash, 900)).await.unwrap();
        store
    }

    fn sale(method: PaymentMethod, cents: i64) -> NewSale {
        NewSale {
            total: Money::from_cents(cents),
            payment_method: method,
            operator_id: 1,
            items: vec![SaleItem {
                product_id: 1,
                name: "Item".into(),
                price: Money::from_cents(cents),
                quantity: Quantity::from_units(1),
                image_url: None,
            }],
            amount_received: method.is_cash().then_some(Money::from_cents(cents)),
            change: None,
        }
    }

    fn count(cents: i64, reason: Option<&str>) -> CloseRegisterRequest {
        CloseRegisterRequest {
            closing_balance: Money::from_cents(cents),
            operator_id: 1,
            notes: None,
            difference_reason: reason.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_summary_of_empty_store() {
        let summary = Store::new().register().summary().await.unwrap();
        assert!(summary.system_balance.is_zero());
        assert!(summary.pix_sales.is_zero());
        assert_eq!(summary.sales_count, 0);
    }

    #[tokio::test]
    async fn test_summary_tracks_new_writes() {
        let store = opening_day().await;
        let before = store.register().summary().await.unwrap();
        assert_eq!(before.system_balance.to_string(), "109.00");

        store.sales().create(sale(PaymentMethod::Pix, 1500)).await.unwrap();
        store.sales().create(sale(PaymentMethod::Debit, 700)).await.unwrap();

        let after = store.register().summary().await.unwrap();
        assert_eq!(after.system_balance, before.system_balance);
        assert_eq!(after.pix_sales.cents(), 1500);
        assert_eq!(after.card_sales.cents(), 700);
        assert_eq!(after.sales_count, 3);
        assert_eq!(
            after.cash_sales + after.card_sales + after.pix_sales,
            after.total_sales
        );
    }

    #[tokio::test]
    async fn test_close_matching_count() {
        let store = opening_day().await;
        let record = store.register().close(count(10900, None)).await.unwrap();

        assert_eq!(record.id, 1);
        assert_eq!(record.difference, None);
        assert_eq!(record.opening_balance.to_string(), "100.00");
        assert_eq!(record.cash_sales.to_string(), "9.00");
        assert_eq!(store.daily_registers().list_all().await.unwrap(), vec![record]);
    }

    #[tokio::test]
    async fn test_close_short_count() {
        let store = opening_day().await;

        let err = store.register().close(count(10000, None)).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(CoreError::DifferenceReasonRequired { .. })
        ));
        assert!(store.daily_registers().list_all().await.unwrap().is_empty());

        let record = store
            .register()
            .close(count(10000, Some("Troco errado")))
            .await
            .unwrap();
        assert_eq!(record.difference.map(|d| d.to_string()), Some("-9.00".into()));
    }

    #[tokio::test]
    async fn test_close_does_not_reset_ledger() {
        let store = opening_day().await;
        store.register().close(count(10900, None)).await.unwrap();

        let summary = store.register().summary().await.unwrap();
        assert_eq!(summary.system_balance.to_string(), "109.00");

        let second = store.register().close(count(10900, None)).await.unwrap();
        assert_eq!(second.id, 2);
        assert_eq!(second.difference, None);
    }

    #[tokio::test]
    async fn test_largest_movements_keep_register_usable() {
        let store = opening_day().await;
        let deposit = |amount: Money| NewCashTransaction {
            amount,
            reason: CashReason::Other,
            notes: None,
            operator_id: 1,
        };

        for amount in [Money::from_cents(i64::MAX), Money::from_cents(i64::MIN)] {
            assert!(matches!(
                store.cash_transactions().create(deposit(amount)).await,
                Err(StoreError::Domain(CoreError::Validation(_)))
            ));
        }

        store.cash_transactions().create(deposit(MAX_AMOUNT)).await.unwrap();
        store.cash_transactions().create(deposit(MAX_AMOUNT)).await.unwrap();

        let summary = store.register().summary().await.unwrap();
        assert_eq!(
            summary.system_balance,
            MAX_AMOUNT + MAX_AMOUNT + Money::from_cents(10900)
        );

        let record = store
            .register()
            .close(count(10900, Some("Depósitos de teste")))
            .await
            .unwrap();
        assert_eq!(record.difference, Some(-(MAX_AMOUNT + MAX_AMOUNT)));
    }

    #[tokio::test]
    async fn test_close_unknown_operator() {
        let store = opening_day().await;
        let mut request = count(10900, None);
        request.operator_id = 42;

        assert!(matches!(
            store.register().close(request).await,
            Err(StoreError::ForeignKeyViolation { .. })
        ));
    }
}
