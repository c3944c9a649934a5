//! # pdv-store: In-Memory Entity Store for the PDV
//!
//! This crate holds every user, category, product, sale, cash transaction and
//! daily register record for the lifetime of the process. Nothing is written
//! to disk; a restart starts from the seed fixtures again.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          PDV Data Flow                                  │
//! │                                                                         │
//! │  HTTP handler (POST /api/sales)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     pdv-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │    Store      │    │  Repositories │    │   Fixtures   │   │   │
//! │  │   │  (store.rs)   │    │  (one / kind) │    │  (seed data) │   │   │
//! │  │   │               │    │               │    │              │   │   │
//! │  │   │ RwLock<Tables>│◄───│ SaleRepo      │    │ 2 users      │   │   │
//! │  │   │ IdSequence×6  │    │ CashRepo      │    │ 31 products  │   │   │
//! │  │   │               │    │ RegisterSvc   │    │ 3 sales      │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The shared store handle and its tables
//! - [`sequence`] - Per-kind atomic id allocation
//! - [`repository`] - Repository implementations (one per entity kind)
//! - [`fixtures`] - Seed data loaded at startup
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pdv_store::Store;
//!
//! let store = Store::new();
//! let categories = store.categories().list_all().await?;
//! let summary = store.register().summary().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod fixtures;
pub mod repository;
pub mod sequence;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use sequence::IdSequence;
pub use store::Store;

// Repository re-exports for convenience
pub use repository::cash::CashTransactionRepository;
pub use repository::category::CategoryRepository;
pub use repository::daily_register::DailyRegisterRepository;
pub use repository::product::ProductRepository;
pub use repository::register::RegisterService;
pub use repository::sale::SaleRepository;
pub use repository::user::UserRepository;
