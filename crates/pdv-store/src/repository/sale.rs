//! # Sale Repository
//!
//! Recorded sales. A sale is written once, at checkout, and never changes.
//!
//! ## Recording a Sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Recording                                    │
//! │                                                                         │
//! │  1. VERIFY (pdv-core validate_sale)                                     │
//! │     └── items non-empty, total = Σ price × qty, change = recv − total   │
//! │                                                                         │
//! │  2. CHECK REFERENCES (under write lock)                                 │
//! │     └── operator_id must be a known user                                │
//! │                                                                         │
//! │  3. INSERT                                                              │
//! │     └── next id from the sale sequence, created_at = now                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Items are embedded snapshots, so later catalog changes never alter a
//! historical receipt.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::repository::filter_by_range;
use crate::store::StoreInner;
use pdv_core::validation::validate_sale;
use pdv_core::{DateRange, NewSale, Sale};

/// Repository for sale records.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    inner: Arc<StoreInner>,
}

impl SaleRepository {
    pub(crate) fn new(inner: Arc<StoreInner>) -> Self {
        SaleRepository { inner }
    }

    /// Verifies and records a sale.
    ///
    /// The stored total and change are the recomputed values, not the ones
    /// the client sent.
    ///
    /// ## Errors
    /// - `Domain` if the sale fails the integrity check
    /// - `ForeignKeyViolation` if `operator_id` does not exist
    pub async fn create(&self, input: NewSale) -> StoreResult<Sale> {
        let sale = validate_sale(&input)?;

        let mut tables = self.inner.tables.write().await;
        if !tables.has_user(sale.operator_id) {
            return Err(StoreError::dangling("operatorId", sale.operator_id));
        }

        let id = self.inner.ids.sales.next_id();
        debug!(id, items = sale.items.len(), "Inserting sale");

        let sale = Sale {
            id,
            total: sale.total,
            payment_method: sale.payment_method,
            amount_received: sale.amount_received,
            change: sale.change,
            operator_id: sale.operator_id,
            created_at: Utc::now(),
            items: sale.items,
        };
        tables.sales.insert(id, sale.clone());

        info!(
            id,
            total = %sale.total,
            method = %sale.payment_method,
            operator_id = sale.operator_id,
            "Sale recorded"
        );
        Ok(sale)
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: i64) -> StoreResult<Option<Sale>> {
        Ok(self.inner.tables.read().await.sales.get(&id).cloned())
    }

    /// All sales in id order.
    pub async fn list_all(&self) -> StoreResult<Vec<Sale>> {
        Ok(self.inner.tables.read().await.sales.values().cloned().collect())
    }

    /// Sales whose `created_at` falls within the range (inclusive).
    pub async fn list_by_date_range(&self, range: DateRange) -> StoreResult<Vec<Sale>> {
        let tables = self.inner.tables.read().await;
        Ok(filter_by_range(&tables.sales, &range, |s| s.created_at))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;

    use crate::{Store, StoreError};
    use pdv_core::{CoreError, DateRange, Money, NewSale, NewUser, PaymentMethod, Quantity, SaleItem};

    async fn store_with_operator() -> Store {
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
    }

    fn item(product_id: i64, price_cents: i64, qty: Quantity) -> SaleItem {
        SaleItem {
            product_id,
            name: format!("Produto {}", product_id),
            price: Money::from_cents(price_cents),
            quantity: qty,
            image_url: None,
        }
    }

    fn cash_sale(operator_id: i64) -> NewSale {
        NewSale {
            total: Money::from_cents(900),
            payment_method: PaymentMethod::Cash,
            operator_id,
            items: vec![
                item(1, 250, Quantity::from_units(2)),
                item(2, 400, Quantity::from_units(1)),
            ],
            amount_received: Some(Money::from_cents(2000)),
            change: None,
        }
    }

    #[tokio::test]
    async fn test_cash_sale_round_trip() {
        let store = store_with_operator().await;
        let sale = store.sales().create(cash_sale(1)).await.unwrap();

        assert_eq!(sale.total.to_string(), "9.00");
        assert_eq!(sale.change.map(|c| c.to_string()), Some("11.00".to_string()));

        let stored = store.sales().get_by_id(sale.id).await.unwrap().unwrap();
        assert_eq!(stored, sale);
    }

    #[tokio::test]
    async fn test_ids_strictly_increase() {
        let store = store_with_operator().await;
        let mut last = 0;
        for _ in 0..5 {
            let sale = store.sales().create(cash_sale(1)).await.unwrap();
            assert!(sale.id > last);
            last = sale.id;
        }
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_unique_ids() {
        let store = store_with_operator().await;

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.sales().create(cash_sale(1)).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }

    #[tokio::test]
    async fn test_unknown_operator_rejected() {
        let store = store_with_operator().await;
        let err = store.sales().create(cash_sale(99)).await.unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation { id: 99, .. }));
    }

    #[tokio::test]
    async fn test_mismatched_total_rejected() {
        let store = store_with_operator().await;
        let mut input = cash_sale(1);
        input.total = Money::from_cents(1000);

        let err = store.sales().create(input).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(CoreError::TotalMismatch { .. })
        ));
        assert!(store.sales().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_by_date_range() {
        let store = store_with_operator().await;

        let first = store.sales().create(cash_sale(1)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let middle = Utc::now();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = store.sales().create(cash_sale(1)).await.unwrap();

        let repo = store.sales();

        // Bounds are inclusive on both ends.
        let exact = repo
            .list_by_date_range(DateRange::new(first.created_at, first.created_at))
            .await
            .unwrap();
        assert_eq!(exact, vec![first.clone()]);

        let later = repo
            .list_by_date_range(DateRange::new(middle, second.created_at))
            .await
            .unwrap();
        assert_eq!(later, vec![second.clone()]);

        let everything = repo
            .list_by_date_range(DateRange::new(first.created_at, second.created_at))
            .await
            .unwrap();
        assert_eq!(everything, repo.list_all().await.unwrap());
    }
}
