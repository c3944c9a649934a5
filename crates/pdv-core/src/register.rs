//! # Register Module
//!
//! Cash register reconciliation: what the till should hold, and how a
//! close-of-day count is judged against it.
//!
//! ## Balance Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Register Reconciliation                            │
//! │                                                                         │
//! │  CashTransaction.amount (all, signed) ──┐                               │
//! │                                         ├──► system_balance             │
//! │  Sale.total where channel == Cash ──────┘          │                    │
//! │                                                    │                    │
//! │  Sale.total where channel == Card ──► card_sales   │                    │
//! │  Sale.total where channel == Pix ───► pix_sales    │                    │
//! │                                                    ▼                    │
//! │  Operator counts the drawer ──► closing_balance − system_balance        │
//! │                                         │                               │
//! │                      |diff| ≤ 0.01 ─────┴───── |diff| > 0.01            │
//! │                      no difference            difference + reason       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ledger Semantics
//! The summary always spans the entire history. A closing is recorded next to
//! the history; it does not checkpoint or reset it, so the next day's system
//! balance still includes every earlier movement.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CashTransaction, CloseRegisterRequest, DailyRegister, Sale, SettlementChannel};
use crate::validation::validate_close_request;
use crate::MONEY_TOLERANCE;

// =============================================================================
// Register Summary
// =============================================================================

/// A point-in-time snapshot of the register, recomputed from scratch on
/// every call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSummary {
    /// Cash that should be in the drawer.
    #[ts(type = "string")]
    pub system_balance: Money,
    #[ts(type = "string")]
    pub cash_sales: Money,
    /// Credit and debit together.
    #[ts(type = "string")]
    pub card_sales: Money,
    #[ts(type = "string")]
    pub pix_sales: Money,
    pub sales_count: usize,
    #[ts(type = "string")]
    pub total_sales: Money,
}

impl RegisterSummary {
    /// Aggregates the full sale and cash-transaction history.
    ///
    /// ## Errors
    /// `AmountOverflow` if a running total leaves the `i64` range. Validated
    /// records cannot get there; the check keeps a bad record from taking
    /// the summary and every later close down with it.
    ///
    /// ## Example
    /// ```rust
    /// use pdv_core::RegisterSummary;
    ///
    /// let empty = RegisterSummary::compute([], []).unwrap();
    /// assert!(empty.pix_sales.is_zero());
    /// assert_eq!(empty.sales_count, 0);
    /// ```
    pub fn compute<'a>(
        sales: impl IntoIterator<Item = &'a Sale>,
        cash_transactions: impl IntoIterator<Item = &'a CashTransaction>,
    ) -> CoreResult<Self> {
        let mut summary = RegisterSummary::default();

        for sale in sales {
            summary.sales_count += 1;
            let channel_total = match sale.payment_method.channel() {
                SettlementChannel::Cash => &mut summary.cash_sales,
                SettlementChannel::Card => &mut summary.card_sales,
                SettlementChannel::Pix => &mut summary.pix_sales,
            };
            *channel_total = channel_total
                .checked_add(sale.total)
                .ok_or_else(|| overflow("sales totals"))?;
        }

        let movements = Money::checked_sum(cash_transactions.into_iter().map(|tx| tx.amount))
            .ok_or_else(|| overflow("cash movements"))?;

        summary.system_balance = movements
            .checked_add(summary.cash_sales)
            .ok_or_else(|| overflow("system balance"))?;
        summary.total_sales =
            Money::checked_sum([summary.cash_sales, summary.card_sales, summary.pix_sales])
                .ok_or_else(|| overflow("total sales"))?;
        Ok(summary)
    }

    /// Balance before the cash sales were added.
    ///
    /// This is an approximation of the day's opening float: cash movements
    /// are not split by day, so every movement in the history is included.
    pub fn opening_balance(&self) -> Money {
        self.system_balance - self.cash_sales
    }
}

fn overflow(context: &str) -> CoreError {
    CoreError::AmountOverflow {
        context: context.to_string(),
    }
}

// =============================================================================
// Register Closing
// =============================================================================

/// A validated close-of-day outcome, ready to be stored as a
/// [`DailyRegister`] once the store assigns an id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterClosing {
    pub opening_balance: Money,
    pub closing_balance: Money,
    pub system_balance: Money,
    pub cash_sales: Money,
    pub card_sales: Money,
    pub pix_sales: Money,
    pub difference: Option<Money>,
    pub difference_reason: Option<String>,
    pub notes: Option<String>,
    pub operator_id: i64,
}

impl RegisterClosing {
    pub fn has_difference(&self) -> bool {
        self.difference.is_some()
    }

    pub fn into_record(self, id: i64, closed_at: chrono::DateTime<chrono::Utc>) -> DailyRegister {
        DailyRegister {
            id,
            opening_balance: self.opening_balance,
            closing_balance: self.closing_balance,
            system_balance: self.system_balance,
            cash_sales: self.cash_sales,
            card_sales: self.card_sales,
            pix_sales: self.pix_sales,
            difference: self.difference,
            difference_reason: self.difference_reason,
            notes: self.notes,
            operator_id: self.operator_id,
            closed_at,
        }
    }
}

/// Judges a manual cash count against the summary.
///
/// ## Rules
/// - The count must not be negative
/// - `difference = count − system_balance`
/// - `|difference| > 0.01` records the difference and requires a reason
/// - Within tolerance, no difference is recorded and any reason is dropped
///
/// ## Errors
/// - `Validation` for a negative or oversized count, or oversized text
/// - `DifferenceReasonRequired` when a reason is needed and missing
/// - `AmountOverflow` if the difference does not fit
pub fn plan_closing(
    summary: &RegisterSummary,
    request: &CloseRegisterRequest,
) -> CoreResult<RegisterClosing> {
    let request = validate_close_request(request)?;

    let difference = request
        .closing_balance
        .checked_sub(summary.system_balance)
        .ok_or_else(|| overflow("register difference"))?;
    let (difference, difference_reason) = if difference.within(Money::zero(), MONEY_TOLERANCE) {
        (None, None)
    } else {
        match request.difference_reason {
            Some(reason) => (Some(difference), Some(reason)),
            None => return Err(CoreError::DifferenceReasonRequired { difference }),
        }
    };

    Ok(RegisterClosing {
        opening_balance: summary.opening_balance(),
        closing_balance: request.closing_balance,
        system_balance: summary.system_balance,
        cash_sales: summary.cash_sales,
        card_sales: summary.card_sales,
        pix_sales: summary.pix_sales,
        difference,
        difference_reason,
        notes: request.notes,
        operator_id: request.operator_id,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
