//! # Store Handle
//!
//! The shared in-memory store and its tables.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Entity Store                                       │
//! │                                                                         │
//! │  Server startup                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store::new() ← One per process, cloned into every handler              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │        Arc<StoreInner>                  │                            │
//! │  │  ┌──────────────────────────────────┐   │                            │
//! │  │  │ RwLock<Tables>                   │   │                            │
//! │  │  │  users            BTreeMap<i64,_>│   │                            │
//! │  │  │  categories       BTreeMap<i64,_>│   │                            │
//! │  │  │  products         BTreeMap<i64,_>│   │                            │
//! │  │  │  sales            BTreeMap<i64,_>│   │                            │
//! │  │  │  cash_transactions BTreeMap<i64,_>│  │                            │
//! │  │  │  daily_registers  BTreeMap<i64,_>│   │                            │
//! │  │  └──────────────────────────────────┘   │                            │
//! │  │  IdSequence × 6 (atomic, start at 1)    │                            │
//! │  └─────────────────────────────────────────┘                            │
//! │       │                                                                 │
//! │       │ Concurrent requests                                             │
//! │       ▼                                                                 │
//! │  GET  ──► read lock  (many at once)                                     │
//! │  POST ──► write lock (one at a time, check refs + insert)               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A single lock over all tables keeps cross-table checks (does this
//! operator exist?) and the register close consistent with the insert that
//! follows them. `BTreeMap` iteration order is id order, which is also
//! insertion order because ids only grow.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use pdv_core::{CashTransaction, Category, DailyRegister, Product, Sale, User};

use crate::repository::cash::CashTransactionRepository;
use crate::repository::category::CategoryRepository;
use crate::repository::daily_register::DailyRegisterRepository;
use crate::repository::product::ProductRepository;
use crate::repository::register::RegisterService;
use crate::repository::sale::SaleRepository;
use crate::repository::user::UserRepository;
use crate::sequence::IdSequence;

// =============================================================================
// Tables
// =============================================================================

/// One map per entity kind, keyed by id.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub users: BTreeMap<i64, User>,
    pub categories: BTreeMap<i64, Category>,
    pub products: BTreeMap<i64, Product>,
    pub sales: BTreeMap<i64, Sale>,
    pub cash_transactions: BTreeMap<i64, CashTransaction>,
    pub daily_registers: BTreeMap<i64, DailyRegister>,
}

impl Tables {
    /// Reference check shared by every record that carries an `operatorId`.
    pub fn has_user(&self, id: i64) -> bool {
        self.users.contains_key(&id)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Sequences {
    pub users: IdSequence,
    pub categories: IdSequence,
    pub products: IdSequence,
    pub sales: IdSequence,
    pub cash_transactions: IdSequence,
    pub daily_registers: IdSequence,
}

#[derive(Debug, Default)]
pub(crate) struct StoreInner {
    pub tables: RwLock<Tables>,
    pub ids: Sequences,
}

// =============================================================================
// Store
// =============================================================================

/// Main store handle providing repository access.
///
/// Cloning is cheap: all clones share the same tables.
///
/// ## Usage in Handlers
/// ```rust,ignore
/// async fn list_sales(State(state): State<AppState>) -> ApiResult<Json<Vec<Sale>>> {
///     let sales = state.store.sales().list_all().await?;
///     Ok(Json(sales))
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<StoreInner>,
}

/// Row counts per table, for startup logging and health reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreCounts {
    pub users: usize,
    pub categories: usize,
    pub products: usize,
    pub sales: usize,
    pub cash_transactions: usize,
    pub daily_registers: usize,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        info!("Initializing in-memory entity store");
        Store::default()
    }

    /// Returns the user repository.
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.inner.clone())
    }

    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.inner.clone())
    }

    /// Returns the product repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let drinks = store.products().list_by_category(1).await?;
    /// ```
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.inner.clone())
    }

    /// Returns the sale repository.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.inner.clone())
    }

    pub fn cash_transactions(&self) -> CashTransactionRepository {
        CashTransactionRepository::new(self.inner.clone())
    }

    pub fn daily_registers(&self) -> DailyRegisterRepository {
        DailyRegisterRepository::new(self.inner.clone())
    }

    /// Returns the register service (summary and close-of-day).
    pub fn register(&self) -> RegisterService {
        RegisterService::new(self.inner.clone())
    }

    pub async fn counts(&self) -> StoreCounts {
        let tables = self.inner.tables.read().await;
        StoreCounts {
            users: tables.users.len(),
            categories: tables.categories.len(),
            products: tables.products.len(),
            sales: tables.sales.len(),
            cash_transactions: tables.cash_transactions.len(),
            daily_registers: tables.daily_registers.len(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
