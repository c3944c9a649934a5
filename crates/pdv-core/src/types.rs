//! # Domain Types
//!
//! Core domain records used throughout the PDV.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │◄──│    Product      │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)       │       │
//! │  │  name, icon     │   │  price (Money)  │   │  username       │       │
//! │  └─────────────────┘   │  category_id    │   │  password_hash  │       │
//! │                        └────────┬────────┘   └────────┬────────┘       │
//! │                                 │ snapshot            │ operator_id    │
//! │                        ┌────────▼────────┐            │                │
//! │                        │      Sale       │◄───────────┤                │
//! │                        │  items[]        │            │                │
//! │                        │  payment_method │            │                │
//! │                        └─────────────────┘            │                │
//! │                                                       │                │
//! │  ┌─────────────────┐   ┌─────────────────┐            │                │
//! │  │ CashTransaction │◄──┤  DailyRegister  │◄───────────┘                │
//! │  │  amount (±)     │   │  system vs      │                             │
//! │  │  reason         │   │  counted cash   │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every record has an `i64` id assigned by the entity store from a per-kind
//! sequence starting at 1. Records are append-only: nothing is updated or
//! deleted after creation.
//!
//! ## Wire Format
//! All records serialize with camelCase keys. Money fields are decimal
//! strings (see [`crate::money`]).

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::{Money, Quantity};

// =============================================================================
// User
// =============================================================================

/// An operator who can log in and ring up sales.
///
/// Only the salted password hash is kept; it never leaves the server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Display name.
    pub name: String,
    pub is_admin: bool,
}

impl User {
    /// The public part of the record, as returned by login.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            name: self.name.clone(),
            is_admin: self.is_admin,
        }
    }
}

/// Input for creating a user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub is_admin: bool,
}

/// Login response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub is_admin: bool,
}

/// Login request body.
///
/// Missing fields deserialize as empty strings so that validation, not the
/// JSON layer, reports them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

// =============================================================================
// Category
// =============================================================================

/// A product category shown as a tile in the sales screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Icon identifier understood by the client (e.g. `local_bar`).
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCategory {
    pub name: String,
    pub icon: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,

    /// Display name shown to the cashier and on the receipt.
    pub name: String,

    pub description: Option<String>,

    /// Unit price (per item, or per kg for weighed goods).
    #[ts(type = "string")]
    pub price: Money,

    pub image_url: Option<String>,

    pub category_id: i64,

    /// Out-of-stock products stay listed but cannot be added to a cart.
    pub in_stock: bool,
}

/// Input for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[ts(type = "string")]
    pub price: Money,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category_id: i64,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid.
///
/// Stored and emitted as the display label the client shows; the short id is
/// accepted on input as well (see [`PaymentMethod::from_wire`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    #[serde(rename = "Dinheiro")]
    Cash,
    #[serde(rename = "Cartão de Crédito")]
    Credit,
    #[serde(rename = "Cartão de Débito")]
    Debit,
    #[serde(rename = "PIX")]
    Pix,
}

/// Where the money from a sale ends up.
///
/// ```text
/// Cash   ──► Cash  (counted in the till)
/// Credit ──┐
/// Debit  ──┴► Card
/// Pix    ──► Pix
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettlementChannel {
    Cash,
    Card,
    Pix,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Credit,
        PaymentMethod::Debit,
        PaymentMethod::Pix,
    ];

    /// Display label, which is also the stored form.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Dinheiro",
            PaymentMethod::Credit => "Cartão de Crédito",
            PaymentMethod::Debit => "Cartão de Débito",
            PaymentMethod::Pix => "PIX",
        }
    }

    /// Short id used by the checkout screen.
    pub const fn id(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Credit => "credit",
            PaymentMethod::Debit => "debit",
            PaymentMethod::Pix => "pix",
        }
    }

    /// Parses either the display label or the short id.
    pub fn from_wire(value: &str) -> Option<PaymentMethod> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.label() == value || method.id() == value)
    }

    pub const fn channel(&self) -> SettlementChannel {
        match self {
            PaymentMethod::Cash => SettlementChannel::Cash,
            PaymentMethod::Credit | PaymentMethod::Debit => SettlementChannel::Card,
            PaymentMethod::Pix => SettlementChannel::Pix,
        }
    }

    /// Only cash sales carry tender and change.
    #[inline]
    pub const fn is_cash(&self) -> bool {
        matches!(self.channel(), SettlementChannel::Cash)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const PAYMENT_METHOD_NAMES: &[&str] = &[
    "Dinheiro",
    "Cartão de Crédito",
    "Cartão de Débito",
    "PIX",
    "cash",
    "credit",
    "debit",
    "pix",
];

impl<'de> Deserialize<'de> for PaymentMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(PaymentMethodVisitor)
    }
}

struct PaymentMethodVisitor;

impl<'de> Visitor<'de> for PaymentMethodVisitor {
    type Value = PaymentMethod;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a payment method label or id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<PaymentMethod, E> {
        PaymentMethod::from_wire(v).ok_or_else(|| E::unknown_variant(v, PAYMENT_METHOD_NAMES))
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A line item in a sale.
/// Uses snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub product_id: i64,
    /// Product name at time of sale (frozen).
    pub name: String,
    /// Unit price at time of sale (frozen).
    #[ts(type = "string")]
    pub price: Money,
    #[ts(type = "number")]
    pub quantity: Quantity,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl SaleItem {
    /// Line total rounded to cents.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

/// A completed sale. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    #[ts(type = "string")]
    pub total: Money,
    pub payment_method: PaymentMethod,
    /// Cash tendered by the customer (cash sales only).
    #[ts(type = "string | null")]
    pub amount_received: Option<Money>,
    /// Change handed back (cash sales only).
    #[ts(type = "string | null")]
    pub change: Option<Money>,
    pub operator_id: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub items: Vec<SaleItem>,
}

/// Input for recording a sale, as posted by checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    #[ts(type = "string")]
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub operator_id: i64,
    pub items: Vec<SaleItem>,
    #[serde(default)]
    #[ts(type = "string | null")]
    pub amount_received: Option<Money>,
    #[serde(default)]
    #[ts(type = "string | null")]
    pub change: Option<Money>,
}

// =============================================================================
// Cash Transaction
// =============================================================================

/// Why cash was moved in or out of the till.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CashReason {
    /// Float placed in the drawer at the start of the day.
    Opening,
    Adjustment,
    Other,
}

/// A manual cash movement. Positive amounts add to the till.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CashTransaction {
    pub id: i64,
    #[ts(type = "string")]
    pub amount: Money,
    pub reason: CashReason,
    pub notes: Option<String>,
    pub operator_id: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewCashTransaction {
    #[ts(type = "string")]
    pub amount: Money,
    pub reason: CashReason,
    #[serde(default)]
    pub notes: Option<String>,
    pub operator_id: i64,
}

// =============================================================================
// Daily Register
// =============================================================================

/// The outcome of a close-of-day cash count.
///
/// `difference` and `difference_reason` are only present when the count was
/// off by more than [`crate::MONEY_TOLERANCE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DailyRegister {
    pub id: i64,
    #[ts(type = "string")]
    pub opening_balance: Money,
    /// Manually counted cash.
    #[ts(type = "string")]
    pub closing_balance: Money,
    /// What the ledger says should be in the till.
    #[ts(type = "string")]
    pub system_balance: Money,
    #[ts(type = "string")]
    pub cash_sales: Money,
    #[ts(type = "string")]
    pub card_sales: Money,
    #[ts(type = "string")]
    pub pix_sales: Money,
    #[ts(type = "string | null")]
    pub difference: Option<Money>,
    pub difference_reason: Option<String>,
    pub notes: Option<String>,
    pub operator_id: i64,
    #[ts(as = "String")]
    pub closed_at: DateTime<Utc>,
}

/// Close-of-day request body.
///
/// Balances computed by the server are not part of the request; older clients
/// that still send them have those fields ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CloseRegisterRequest {
    /// Manually counted cash.
    #[ts(type = "string")]
    pub closing_balance: Money,
    pub operator_id: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub difference_reason: Option<String>,
}

// =============================================================================
// Date Range
// =============================================================================

/// An inclusive timestamp window for history queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        DateRange { start, end }
    }

    /// True when `at` falls within `[start, end]`.
    #[inline]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_payment_method_wire_format() {
        let json = serde_json::to_string(&PaymentMethod::Credit).unwrap();
        assert_eq!(json, "\"Cartão de Crédito\"");

        let by_label: PaymentMethod = serde_json::from_str("\"Dinheiro\"").unwrap();
        let by_id: PaymentMethod = serde_json::from_str("\"pix\"").unwrap();
        assert_eq!(by_label, PaymentMethod::Cash);
        assert_eq!(by_id, PaymentMethod::Pix);

        assert!(serde_json::from_str::<PaymentMethod>("\"cheque\"").is_err());
        assert!(serde_json::from_str::<PaymentMethod>("3").is_err());

        // Every method reads back from both its label and its short id.
        for method in PaymentMethod::ALL {
            let label: PaymentMethod = serde_json::from_value(method.label().into()).unwrap();
            let id: PaymentMethod = serde_json::from_value(method.id().into()).unwrap();
            assert_eq!((label, id), (method, method));
            assert_eq!(serde_json::to_value(method).unwrap(), method.label());
        }
    }

    #[test]
    fn test_payment_method_channels() {
        assert_eq!(PaymentMethod::Credit.channel(), SettlementChannel::Card);
        assert_eq!(PaymentMethod::Debit.channel(), SettlementChannel::Card);
        assert_eq!(PaymentMethod::Pix.channel(), SettlementChannel::Pix);
        assert!(PaymentMethod::Cash.is_cash());
        assert!(PaymentMethod::ALL.iter().filter(|m| m.is_cash()).count() == 1);
    }

    #[test]
    fn test_user_hash_is_not_serialized() {
        let user = User {
            id: 1,
            username: "admin".into(),
            password_hash: "$argon2id$secret".into(),
            name: "Administrador".into(),
            is_admin: true,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["isAdmin"], true);
        assert_eq!(user.profile().name, "Administrador");
    }

    #[test]
    fn test_new_product_defaults_in_stock() {
        let product: NewProduct =
            serde_json::from_str(r#"{"name":"Pão","price":"0.75","categoryId":6}"#).unwrap();
        assert!(product.in_stock);
        assert_eq!(product.price.cents(), 75);
        assert_eq!(product.description, None);
    }

    #[test]
    fn test_new_sale_accepts_numbers_from_client() {
        let sale: NewSale = serde_json::from_str(
            r#"{
                "total": 9,
                "paymentMethod": "cash",
                "operatorId": 2,
                "amountReceived": 20,
                "change": 11,
                "items": [
                    {"productId": 1, "name": "Água Mineral", "price": 2.5, "quantity": 2},
                    {"productId": 2, "name": "Refrigerante", "price": 4, "quantity": 1}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(sale.total.cents(), 900);
        assert_eq!(sale.items[0].line_total().cents(), 500);
        assert_eq!(sale.change, Some(Money::from_cents(1100)));
    }

    #[test]
    fn test_close_request_ignores_server_fields() {
        let request: CloseRegisterRequest = serde_json::from_str(
            r#"{"closingBalance":"109.00","operatorId":2,"systemBalance":"1.00"}"#,
        )
        .unwrap();
        assert_eq!(request.closing_balance.cents(), 10900);
        assert_eq!(request.difference_reason, None);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let end = start + Duration::hours(1);
        let range = DateRange::new(start, end);

        assert!(range.contains(start));
        assert!(range.contains(end));
        assert!(!range.contains(end + Duration::milliseconds(1)));
        assert!(!range.contains(start - Duration::seconds(1)));
    }
}
