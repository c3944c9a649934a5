//! # Validation Module
//!
//! Input validation for everything that reaches the entity store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browser client                                                │
//! │  ├── Basic format checks (empty, length)                                │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: HTTP handler (Rust)                                           │
//! │  ├── Type validation (deserialization)                                  │
//! │  └── THIS MODULE: field rules + sale integrity                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Entity store                                                  │
//! │  ├── UNIQUE username                                                    │
//! │  └── operator / category references must exist                         │
//! │                                                                         │
//! │  The client is never trusted for derived values (totals, change).       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validators that accept a whole input record return a normalized copy:
//! names are trimmed and blank optional text becomes `None`.
//!
//! ## Usage
//! ```rust
//! use pdv_core::validation::{validate_product_name, validate_quantity};
//! use pdv_core::Quantity;
//!
//! assert!(validate_product_name("Água Mineral 500ml").is_ok());
//! assert!(validate_quantity(Quantity::from_thousandths(660)).is_ok());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{Money, Quantity};
use crate::types::{
    CloseRegisterRequest, LoginRequest, NewCashTransaction, NewCategory, NewProduct, NewSale,
};
use crate::{MAX_AMOUNT, MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MONEY_TOLERANCE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest free-text note accepted on cash movements and closings.
pub const MAX_NOTES_LEN: usize = 500;

// =============================================================================
// String Validators
// =============================================================================

/// Checks a required text field and returns it trimmed.
///
/// Lengths are counted in characters, not bytes, so accented names like
/// "Feijão" are measured the way an operator would count them.
pub fn validate_required_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Checks an optional text field. Blank text is treated as absent.
pub fn validate_optional_text(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> ValidationResult<Option<String>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) if v.chars().count() > max => Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        }),
        Some(v) => Ok(Some(v.to_string())),
    }
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 200 characters
///
/// ## Example
/// ```rust
/// use pdv_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Refrigerante 2L").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    validate_required_text("name", name, 200)
}

/// Both login fields must be present. The password is not trimmed.
pub fn validate_login(request: &LoginRequest) -> ValidationResult<()> {
    if request.username.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if request.password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (9 999.999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: Add Item                                                         │
/// │                                                                         │
/// │  Operator weighs apples: 0.66 kg                                        │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(0.66) ← THIS FUNCTION                                │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"                │
/// │       │                                                                 │
/// │       ├── qty > 9999.999? → Error: out of range                         │
/// │       │                                                                 │
/// │       └── OK → Proceed with add_item                                    │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: Quantity) -> ValidationResult<()> {
    if !qty.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: "0.001".to_string(),
            max: MAX_ITEM_QUANTITY.to_string(),
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use pdv_core::validation::validate_price;
/// use pdv_core::Money;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    validate_amount("price", price)
}

/// Rejects any amount whose magnitude exceeds [`MAX_AMOUNT`].
///
/// Every money value that enters the store passes through here, so the
/// register can add up the whole history without leaving the `i64` range.
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.cents().unsigned_abs() > MAX_AMOUNT.cents().unsigned_abs() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: (-MAX_AMOUNT).to_string(),
            max: MAX_AMOUNT.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Sums `price × quantity` lines and checks the result against [`MAX_AMOUNT`].
pub fn validate_lines_total<I>(lines: I) -> ValidationResult<Money>
where
    I: IntoIterator<Item = (Money, Quantity)>,
{
    Money::sum_of_lines(lines)
        .filter(|total| validate_amount("total", *total).is_ok())
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "total".to_string(),
            min: Money::zero().to_string(),
            max: MAX_AMOUNT.to_string(),
        })
}

/// Validates cart size before adding one more line.
///
/// ## Rules
/// - Must not exceed MAX_CART_ITEMS (100)
pub fn validate_cart_size(current_items: usize) -> CoreResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(CoreError::CartTooLarge {
            max: MAX_CART_ITEMS,
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

pub fn validate_category(input: &NewCategory) -> ValidationResult<NewCategory> {
    Ok(NewCategory {
        name: validate_required_text("name", &input.name, 100)?,
        icon: validate_required_text("icon", &input.icon, 100)?,
    })
}

/// Field rules for a new product. The category reference is checked by the
/// store, which is the only place that knows which categories exist.
pub fn validate_product(input: &NewProduct) -> ValidationResult<NewProduct> {
    validate_price(input.price)?;

    Ok(NewProduct {
        name: validate_product_name(&input.name)?,
        description: validate_optional_text("description", input.description.as_deref(), 1000)?,
        price: input.price,
        image_url: validate_optional_text("imageUrl", input.image_url.as_deref(), 2048)?,
        category_id: input.category_id,
        in_stock: input.in_stock,
    })
}

/// Cash movements are signed; zero would be a no-op entry in the ledger.
pub fn validate_cash_transaction(input: &NewCashTransaction) -> ValidationResult<NewCashTransaction> {
    if input.amount.is_zero() {
        return Err(ValidationError::MustNotBeZero {
            field: "amount".to_string(),
        });
    }
    validate_amount("amount", input.amount)?;

    Ok(NewCashTransaction {
        amount: input.amount,
        reason: input.reason,
        notes: validate_optional_text("notes", input.notes.as_deref(), MAX_NOTES_LEN)?,
        operator_id: input.operator_id,
    })
}

/// Field rules for a close-of-day request. Whether a reason is required
/// depends on the system balance and is decided by
/// [`crate::register::plan_closing`].
pub fn validate_close_request(
    input: &CloseRegisterRequest,
) -> ValidationResult<CloseRegisterRequest> {
    if input.closing_balance.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "closingBalance".to_string(),
        });
    }
    validate_amount("closingBalance", input.closing_balance)?;

    Ok(CloseRegisterRequest {
        closing_balance: input.closing_balance,
        operator_id: input.operator_id,
        notes: validate_optional_text("notes", input.notes.as_deref(), MAX_NOTES_LEN)?,
        difference_reason: validate_optional_text(
            "differenceReason",
            input.difference_reason.as_deref(),
            MAX_NOTES_LEN,
        )?,
    })
}

/// Verifies a sale submitted by checkout against its own items.
///
/// ## Rules
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  items         non-empty, ≤ MAX_CART_ITEMS, each: name, price ≥ 0,      │
/// │                quantity in range                                        │
/// │  total         |submitted − Σ price × qty| ≤ 0.01, Σ ≤ MAX_AMOUNT       │
/// │  cash          amountReceived required and ≥ total                      │
/// │                change = received − total (submitted change must agree)  │
/// │  credit/debit  amountReceived and change must be absent                 │
/// │  /pix                                                                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Returns
/// The sale to persist, carrying the recomputed total and change. Values the
/// client sent are only compared, never stored.
pub fn validate_sale(input: &NewSale) -> CoreResult<NewSale> {
    if input.items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        }
        .into());
    }

    if input.items.len() > MAX_CART_ITEMS {
        return Err(CoreError::CartTooLarge {
            max: MAX_CART_ITEMS,
        });
    }

    let mut items = Vec::with_capacity(input.items.len());
    for item in &input.items {
        validate_price(item.price)?;
        validate_quantity(item.quantity)?;
        let mut item = item.clone();
        item.name = validate_product_name(&item.name)?;
        items.push(item);
    }

    let total = validate_lines_total(items.iter().map(|item| (item.price, item.quantity)))?;
    if !input.total.within(total, MONEY_TOLERANCE) {
        return Err(CoreError::TotalMismatch {
            submitted: input.total,
            computed: total,
        });
    }

    let (amount_received, change) = if input.payment_method.is_cash() {
        let received = input.amount_received.ok_or_else(|| ValidationError::Required {
            field: "amountReceived".to_string(),
        })?;
        validate_amount("amountReceived", received)?;

        if received < total {
            return Err(CoreError::InvalidPaymentAmount {
                reason: format!("amount received {} is less than the total {}", received, total),
            });
        }

        let change = (received - total).max_zero();
        if let Some(submitted) = input.change {
            if !submitted.within(change, MONEY_TOLERANCE) {
                return Err(CoreError::ChangeMismatch {
                    submitted,
                    computed: change,
                });
            }
        }

        (Some(received), Some(change))
    } else {
        let context = format!("for {} payments", input.payment_method);
        if input.amount_received.is_some() {
            return Err(ValidationError::NotApplicable {
                field: "amountReceived".to_string(),
                context,
            }
            .into());
        }
        if input.change.is_some() {
            return Err(ValidationError::NotApplicable {
                field: "change".to_string(),
                context,
            }
            .into());
        }
        (None, None)
    };

    Ok(NewSale {
        total,
        payment_method: input.payment_method,
        operator_id: input.operator_id,
        items,
        amount_received,
        change,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CashReason, PaymentMethod, SaleItem};

    fn item(product_id: i64, price_cents: i64, qty: Quantity) -> SaleItem {
        SaleItem {
            product_id,
            name: format!("Produto {}", product_id),
            price: Money::from_cents(price_cents),
            quantity: qty,
            image_url: None,
        }
    }

    fn cash_sale() -> NewSale {
        NewSale {
            total: Money::from_cents(900),
            payment_method: PaymentMethod::Cash,
            operator_id: 2,
            items: vec![
                item(1, 250, Quantity::from_units(2)),
                item(2, 400, Quantity::from_units(1)),
            ],
            amount_received: Some(Money::from_cents(2000)),
            change: Some(Money::from_cents(1100)),
        }
    }

    #[test]
    fn test_validate_product_name() {
        assert_eq!(validate_product_name("  Pão Francês ").unwrap(), "Pão Francês");
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
        // 200 multibyte characters is still within the limit
        assert!(validate_product_name(&"ã".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_login() {
        let ok = LoginRequest {
            username: "admin".into(),
            password: "password".into(),
        };
        assert!(validate_login(&ok).is_ok());
        assert!(validate_login(&LoginRequest::default()).is_err());
        assert!(validate_login(&LoginRequest {
            username: "admin".into(),
            password: String::new(),
        })
        .is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(Quantity::from_units(1)).is_ok());
        assert!(validate_quantity(Quantity::from_thousandths(1)).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());

        assert!(validate_quantity(Quantity::from_units(0)).is_err());
        assert!(validate_quantity(Quantity::from_units(-1)).is_err());
        assert!(validate_quantity(Quantity::from_units(10_000)).is_err());
    }

    #[test]
    fn test_validate_product_normalizes_blank_optionals() {
        let input = NewProduct {
            name: " Detergente ".into(),
            description: Some("   ".into()),
            price: Money::from_cents(299),
            image_url: None,
            category_id: 3,
            in_stock: true,
        };
        let product = validate_product(&input).unwrap();
        assert_eq!(product.name, "Detergente");
        assert_eq!(product.description, None);

        let negative = NewProduct {
            price: Money::from_cents(-1),
            ..input
        };
        assert!(validate_product(&negative).is_err());
    }

    #[test]
    fn test_validate_category() {
        let ok = NewCategory {
            name: "Bebidas".into(),
            icon: "local_bar".into(),
        };
        assert!(validate_category(&ok).is_ok());

        let missing_icon = NewCategory {
            name: "Bebidas".into(),
            icon: "".into(),
        };
        assert_eq!(
            validate_category(&missing_icon).unwrap_err(),
            ValidationError::Required {
                field: "icon".into()
            }
        );
    }

    #[test]
    fn test_validate_cash_transaction() {
        let mut input = NewCashTransaction {
            amount: Money::from_cents(-2000),
            reason: CashReason::Adjustment,
            notes: Some("sangria".into()),
            operator_id: 1,
        };
        assert!(validate_cash_transaction(&input).is_ok());

        input.amount = Money::zero();
        assert!(validate_cash_transaction(&input).is_err());

        input.amount = Money::from_cents(100);
        input.notes = Some("x".repeat(MAX_NOTES_LEN + 1));
        assert!(validate_cash_transaction(&input).is_err());
    }

    #[test]
    fn test_amounts_are_capped() {
        assert!(validate_amount("amount", MAX_AMOUNT).is_ok());
        assert!(validate_amount("amount", -MAX_AMOUNT).is_ok());
        assert!(matches!(
            validate_amount("amount", MAX_AMOUNT + Money::from_cents(1)),
            Err(ValidationError::OutOfRange { .. })
        ));

        let deposit = NewCashTransaction {
            amount: Money::from_cents(i64::MAX),
            reason: CashReason::Other,
            notes: None,
            operator_id: 1,
        };
        assert!(validate_cash_transaction(&deposit).is_err());
        let withdrawal = NewCashTransaction {
            amount: Money::from_cents(i64::MIN),
            ..deposit
        };
        assert!(validate_cash_transaction(&withdrawal).is_err());

        assert!(validate_price(Money::from_cents(i64::MAX)).is_err());

        let close = CloseRegisterRequest {
            closing_balance: Money::from_cents(i64::MAX),
            operator_id: 1,
            notes: None,
            difference_reason: None,
        };
        assert!(validate_close_request(&close).is_err());
    }

    #[test]
    fn test_validate_close_request() {
        let request = CloseRegisterRequest {
            closing_balance: Money::from_cents(-1),
            operator_id: 1,
            notes: None,
            difference_reason: Some("  ".into()),
        };
        assert!(validate_close_request(&request).is_err());

        let request = CloseRegisterRequest {
            closing_balance: Money::zero(),
            ..request
        };
        assert_eq!(validate_close_request(&request).unwrap().difference_reason, None);
    }

    #[test]
    fn test_validate_sale_computes_change() {
        let sale = validate_sale(&cash_sale()).unwrap();
        assert_eq!(sale.total.to_string(), "9.00");
        assert_eq!(sale.change.unwrap().to_string(), "11.00");

        // Change may be omitted; the server fills it in.
        let mut input = cash_sale();
        input.change = None;
        assert_eq!(validate_sale(&input).unwrap().change, Some(Money::from_cents(1100)));
    }

    #[test]
    fn test_validate_sale_rejects_wrong_total() {
        let mut input = cash_sale();
        input.total = Money::from_cents(1000);
        assert!(matches!(
            validate_sale(&input),
            Err(CoreError::TotalMismatch { .. })
        ));

        // Within a cent is accepted and replaced by the computed total.
        input.total = Money::from_cents(901);
        input.change = None;
        assert_eq!(validate_sale(&input).unwrap().total, Money::from_cents(900));
    }

    #[test]
    fn test_validate_sale_weighed_items() {
        let input = NewSale {
            total: Money::from_cents(2348),
            payment_method: PaymentMethod::Credit,
            operator_id: 2,
            items: vec![
                item(11, 890, Quantity::from_units(1)),
                item(16, 799, Quantity::from_units(1)),
                item(6, 999, Quantity::from_thousandths(660)),
            ],
            amount_received: None,
            change: None,
        };
        assert!(validate_sale(&input).is_ok());
    }

    #[test]
    fn test_validate_sale_cash_rules() {
        let mut input = cash_sale();
        input.amount_received = None;
        assert!(validate_sale(&input).is_err());

        let mut input = cash_sale();
        input.amount_received = Some(Money::from_cents(500));
        assert!(matches!(
            validate_sale(&input),
            Err(CoreError::InvalidPaymentAmount { .. })
        ));

        let mut input = cash_sale();
        input.change = Some(Money::from_cents(1500));
        assert!(matches!(
            validate_sale(&input),
            Err(CoreError::ChangeMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_sale_rejects_oversized_totals() {
        let mut input = cash_sale();
        input.payment_method = PaymentMethod::Pix;
        input.amount_received = None;
        input.change = None;

        // i64::MAX / 2 × 9999 would wrap; the price is refused first.
        input.items = vec![item(1, i64::MAX / 2, Quantity::from_units(9999))];
        input.total = Money::from_cents(i64::MAX);
        assert!(matches!(
            validate_sale(&input),
            Err(CoreError::Validation(ValidationError::OutOfRange { ref field, .. })) if field == "price"
        ));

        // Each price is in range but the lines add up past the cap.
        input.items = vec![item(1, MAX_AMOUNT.cents(), Quantity::from_units(9999))];
        input.total = Money::from_cents(MAX_AMOUNT.cents() * 9999);
        assert!(matches!(
            validate_sale(&input),
            Err(CoreError::Validation(ValidationError::OutOfRange { ref field, .. })) if field == "total"
        ));

        input.items = vec![item(1, MAX_AMOUNT.cents(), Quantity::from_units(1))];
        input.total = MAX_AMOUNT;
        assert_eq!(validate_sale(&input).unwrap().total, MAX_AMOUNT);
    }

    #[test]
    fn test_validate_sale_caps_tender() {
        let mut input = cash_sale();
        input.amount_received = Some(Money::from_cents(i64::MAX));
        input.change = None;
        assert!(matches!(
            validate_sale(&input),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_validate_sale_rejects_tender_on_card() {
        let mut input = cash_sale();
        input.payment_method = PaymentMethod::Debit;
        assert!(validate_sale(&input).is_err());

        input.amount_received = None;
        input.change = None;
        let sale = validate_sale(&input).unwrap();
        assert_eq!(sale.amount_received, None);
    }

    #[test]
    fn test_validate_sale_rejects_empty_items() {
        let mut input = cash_sale();
        input.items.clear();
        input.total = Money::zero();
        assert!(validate_sale(&input).is_err());

        let mut input = cash_sale();
        input.items[0].quantity = Quantity::from_units(0);
        assert!(validate_sale(&input).is_err());
    }

    #[test]
    fn test_validate_cart_size() {
        assert!(validate_cart_size(0).is_ok());
        assert!(validate_cart_size(MAX_CART_ITEMS - 1).is_ok());
        assert!(validate_cart_size(MAX_CART_ITEMS).is_err());
    }
}
