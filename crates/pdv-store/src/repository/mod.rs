//! # Repository Module
//!
//! Repository implementations over the in-memory tables.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                           │
//! │       │                                                                 │
//! │       │  store.sales().list_by_date_range(range)                        │
//! │       ▼                                                                 │
//! │  SaleRepository                                                         │
//! │  ├── create(&self, sale)                                                │
//! │  ├── get_by_id(&self, id)                                               │
//! │  ├── list_all(&self)                                                    │
//! │  └── list_by_date_range(&self, range)                                   │
//! │       │                                                                 │
//! │       │  read / write lock                                              │
//! │       ▼                                                                 │
//! │  Tables (BTreeMap per kind)                                             │
//! │                                                                         │
//! │  Every kind follows the same shape. There is no update or delete:       │
//! │  the history is append-only.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`user::UserRepository`] - Operators, lookup by username
//! - [`category::CategoryRepository`] - Product categories
//! - [`product::ProductRepository`] - Catalog, filter by category
//! - [`sale::SaleRepository`] - Recorded sales
//! - [`cash::CashTransactionRepository`] - Manual till movements
//! - [`daily_register::DailyRegisterRepository`] - Close-of-day records
//! - [`register::RegisterService`] - Summary and close, across tables

pub mod cash;
pub mod category;
pub mod daily_register;
pub mod product;
pub mod register;
pub mod sale;
pub mod user;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use pdv_core::DateRange;

/// Clones the records whose timestamp falls inside `range`, in id order.
pub(crate) fn filter_by_range<T: Clone>(
    table: &BTreeMap<i64, T>,
    range: &DateRange,
    timestamp: impl Fn(&T) -> DateTime<Utc>,
) -> Vec<T> {
    table
        .values()
        .filter(|record| range.contains(timestamp(record)))
        .cloned()
        .collect()
}
