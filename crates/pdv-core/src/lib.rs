//! # pdv-core: Pure Business Logic for the PDV
//!
//! This crate is the **heart** of the point-of-sale. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           PDV Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser client                               │   │
//! │  │   Login ──► Categories ──► Cart ──► Checkout ──► Close register │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP/JSON                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    pdv-server (axum routes)                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pdv-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ │   │
//! │  │   │  types  │ │  money  │ │  cart   │ │validation│ │register │ │   │
//! │  │   │  Sale   │ │  Money  │ │  Cart   │ │  rules   │ │ Summary │ │   │
//! │  │   │ Product │ │Quantity │ │ Line    │ │  checks  │ │ Closing │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └─────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                pdv-store (in-memory entity store)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (Product, Sale, CashTransaction, DailyRegister, ...)
//! - [`money`] - Money and Quantity with integer arithmetic (no floating point!)
//! - [`cart`] - Shopping cart and checkout
//! - [`register`] - Register summary aggregation and close-of-day rules
//! - [`validation`] - Business rule validation
//! - [`credentials`] - Password hashing seam
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pdv_core::money::{Money, Quantity};
//!
//! let price: Money = "2.50".parse().unwrap();
//! let line = price.multiply_quantity(Quantity::from_units(2));
//! assert_eq!(line.to_string(), "5.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod credentials;
pub mod error;
pub mod money;
pub mod register;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLineItem};
pub use credentials::Credentials;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Quantity};
pub use register::{plan_closing, RegisterClosing, RegisterSummary};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line, in thousandths (9 999.999).
///
/// Weighed goods use fractional quantities, so the cap is expressed in the
/// same fixed-point unit as [`Quantity`].
pub const MAX_ITEM_QUANTITY: Quantity = Quantity::from_thousandths(9_999_999);

/// Tolerance for money comparisons: sale totals against their items, change
/// against tender, and the manual cash count against the system balance.
pub const MONEY_TOLERANCE: Money = Money::from_cents(1);

/// Largest magnitude accepted for any single amount (10 billion).
///
/// Applies to prices, cash movements, tender, closing counts and sale
/// totals. Keeps every sum the register computes far from `i64` overflow.
pub const MAX_AMOUNT: Money = Money::from_cents(1_000_000_000_000);
