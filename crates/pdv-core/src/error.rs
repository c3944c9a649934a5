//! # Error Types
//!
//! Domain-specific error types for pdv-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pdv-core errors (this file)                                            │
//! │  ├── CoreError        - Business rule violations                        │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  pdv-store errors (separate crate)                                      │
//! │  └── StoreError       - Entity store failures                           │
//! │                                                                         │
//! │  pdv-server errors                                                      │
//! │  └── ApiError         - What the client sees ({message} + status)       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → Client     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, amounts, ...)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::money::{Money, Quantity};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. Every variant except
/// [`CoreError::Credentials`] and [`CoreError::AmountOverflow`] is the
/// client's fault and maps to a 400.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product is not in the cart (or not in the catalog, for cart adds).
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Product is flagged out of stock and cannot be sold.
    #[error("Product {name} is out of stock")]
    OutOfStock { name: String },

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: Quantity, max: Quantity },

    /// The submitted sale total does not match its items.
    ///
    /// ## When This Occurs
    /// ```text
    /// Client sends: total = 23.50
    ///      │
    ///      ▼
    /// Server sums items: 8.90 + 7.99 + 9.99 × 0.66 = 23.48
    ///      │
    ///      ▼
    /// |23.50 - 23.48| > 0.01  →  TotalMismatch
    /// ```
    #[error("Sale total {submitted} does not match the items total {computed}")]
    TotalMismatch { submitted: Money, computed: Money },

    /// The submitted change does not match `received - total`.
    #[error("Change {submitted} does not match the expected change {computed}")]
    ChangeMismatch { submitted: Money, computed: Money },

    /// Payment amount is invalid (insufficient tender, tender on a card sale).
    #[error("Invalid payment amount: {reason}")]
    InvalidPaymentAmount { reason: String },

    /// The manual count differs from the system balance and no reason was given.
    ///
    /// ## User Workflow
    /// ```text
    /// System balance: 109.00     Counted: 100.00
    ///      │
    ///      ▼
    /// difference = -9.00, reason empty
    ///      │
    ///      ▼
    /// DifferenceReasonRequired { difference: -9.00 }
    ///      │
    ///      ▼
    /// UI asks the operator to explain the gap
    /// ```
    #[error("A reason is required for a register difference of {difference}")]
    DifferenceReasonRequired { difference: Money },

    /// A running total left the representable range. Inputs are capped at
    /// [`crate::MAX_AMOUNT`], so this points at corrupt stored data.
    #[error("Amount overflow while computing {context}")]
    AmountOverflow { context: String },

    /// Password hashing failed. This is a server fault, not the caller's.
    #[error("Credential hashing failed: {0}")]
    Credentials(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// True when the error is caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            CoreError::Credentials(_) | CoreError::AmountOverflow { .. }
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value must not be zero.
    #[error("{field} must not be zero")]
    MustNotBeZero { field: String },

    /// Invalid format (e.g., malformed amount, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A field only valid in another context was supplied.
    #[error("{field} is not allowed {context}")]
    NotApplicable { field: String, context: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::TotalMismatch {
            submitted: Money::from_cents(2350),
            computed: Money::from_cents(2348),
        };
        assert_eq!(
            err.to_string(),
            "Sale total 23.50 does not match the items total 23.48"
        );

        let err = CoreError::DifferenceReasonRequired {
            difference: Money::from_cents(-900),
        };
        assert_eq!(
            err.to_string(),
            "A reason is required for a register difference of -9.00"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "username".to_string(),
        };
        assert_eq!(err.to_string(), "username is required");

        let err = ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: "-10000000000.00".to_string(),
            max: "10000000000.00".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "amount must be between -10000000000.00 and 10000000000.00"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "items".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert!(core_err.is_client_error());
        assert!(!CoreError::Credentials("boom".into()).is_client_error());
        assert!(!CoreError::AmountOverflow {
            context: "register summary".into()
        }
        .is_client_error());
    }
}
