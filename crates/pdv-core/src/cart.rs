//! # Cart
//!
//! The shopping cart an operator builds before checkout.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operator Action          Cart Method             State Change          │
//! │  ───────────────          ───────────             ────────────          │
//! │                                                                         │
//! │  Tap Product ────────────► add_item() ──────────► push or merge qty     │
//! │                                                                         │
//! │  Change Quantity ────────► update_quantity() ───► items[i].qty = n      │
//! │                                                                         │
//! │  Tap Remove ─────────────► remove_item() ───────► items.remove(i)       │
//! │                                                                         │
//! │  Cancel Sale ────────────► clear() ─────────────► items.clear()         │
//! │                                                                         │
//! │  Finalize ───────────────► checkout() ──────────► NewSale (cart kept)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart itself is never persisted; only the [`NewSale`] produced by
//! checkout reaches the store.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{Money, Quantity};
use crate::types::{NewSale, PaymentMethod, Product, SaleItem};
use crate::validation::{
    validate_amount, validate_cart_size, validate_lines_total, validate_price, validate_quantity,
};
use crate::MAX_ITEM_QUANTITY;

/// An item in the shopping cart.
///
/// ## Design Notes
/// - `product_id`: Reference to the catalog product
/// - `name`/`price`/`image_url`: Frozen copy of product data at time of adding.
///   The cart keeps showing the price the customer was quoted even if the
///   catalog changes underneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: i64,
    pub name: String,
    #[ts(type = "string")]
    pub price: Money,
    #[ts(type = "number")]
    pub quantity: Quantity,
    pub image_url: Option<String>,
}

impl CartLineItem {
    /// Creates a line from a product, freezing its price.
    pub fn from_product(product: &Product, quantity: Quantity) -> Self {
        CartLineItem {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity,
            image_url: product.image_url.clone(),
        }
    }

    /// Line total (unit price × quantity), rounded to cents.
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }

    fn to_sale_item(&self) -> SaleItem {
        SaleItem {
            product_id: self.product_id,
            name: self.name.clone(),
            price: self.price,
            quantity: self.quantity,
            image_url: self.image_url.clone(),
        }
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding same product increases quantity)
/// - Quantity must be > 0 (updating to 0 removes the item)
/// - Maximum lines: [`crate::MAX_CART_ITEMS`]
/// - Maximum quantity per line: [`crate::MAX_ITEM_QUANTITY`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    pub items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// ## Errors
    /// - `OutOfStock` if the product is flagged out of stock
    /// - `Validation` if the product price is out of range
    /// - `QuantityTooLarge` if the merged quantity would exceed the maximum
    /// - `CartTooLarge` if a new line would exceed the line limit
    pub fn add_item(&mut self, product: &Product, quantity: Quantity) -> CoreResult<()> {
        if !product.in_stock {
            return Err(CoreError::OutOfStock {
                name: product.name.clone(),
            });
        }
        validate_price(product.price)?;
        validate_quantity(quantity)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            let merged = item.quantity + quantity;
            if merged > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: merged,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity = merged;
            return Ok(());
        }

        validate_cart_size(self.items.len())?;
        self.items.push(CartLineItem::from_product(product, quantity));
        Ok(())
    }

    /// Sets the quantity of a line. Zero removes the line.
    pub fn update_quantity(&mut self, product_id: i64, quantity: Quantity) -> CoreResult<()> {
        if quantity.thousandths() == 0 {
            return self.remove_item(product_id);
        }
        validate_quantity(quantity)?;

        let item = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product_id)
            .ok_or(CoreError::ProductNotFound(product_id))?;
        item.quantity = quantity;
        Ok(())
    }

    /// Removes an item from the cart by product ID.
    pub fn remove_item(&mut self, product_id: i64) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() == initial_len {
            Err(CoreError::ProductNotFound(product_id))
        } else {
            Ok(())
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all line quantities.
    pub fn total_quantity(&self) -> Quantity {
        self.items
            .iter()
            .fold(Quantity::default(), |acc, i| acc + i.quantity)
    }

    /// Cart total, rounded once over the exact line products.
    ///
    /// Fails when the total exceeds [`crate::MAX_AMOUNT`].
    pub fn total(&self) -> CoreResult<Money> {
        Ok(validate_lines_total(
            self.items.iter().map(|i| (i.price, i.quantity)),
        )?)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Turns the cart into a sale ready to be posted.
    ///
    /// ## Cash Flow
    /// ```text
    /// total 9.00, received 20.00
    ///      │
    ///      ▼
    /// change = max(0, 20.00 - 9.00) = 11.00
    /// ```
    /// For card and PIX payments `amount_received` must be `None`.
    pub fn checkout(
        &self,
        payment_method: PaymentMethod,
        amount_received: Option<Money>,
        operator_id: i64,
    ) -> CoreResult<NewSale> {
        if self.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let total = self.total()?;
        if let Some(received) = amount_received {
            validate_amount("amountReceived", received)?;
        }
        let (amount_received, change) = match (payment_method.is_cash(), amount_received) {
            (true, None) => {
                return Err(ValidationError::Required {
                    field: "amountReceived".to_string(),
                }
                .into())
            }
            (true, Some(received)) if received < total => {
                return Err(CoreError::InvalidPaymentAmount {
                    reason: format!("amount received {} is less than the total {}", received, total),
                })
            }
            (true, Some(received)) => (Some(received), Some((received - total).max_zero())),
            (false, Some(_)) => {
                return Err(ValidationError::NotApplicable {
                    field: "amountReceived".to_string(),
                    context: format!("for {} payments", payment_method),
                }
                .into())
            }
            (false, None) => (None, None),
        };

        Ok(NewSale {
            total,
            payment_method,
            operator_id,
            items: self.items.iter().map(CartLineItem::to_sale_item).collect(),
            amount_received,
            change,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
