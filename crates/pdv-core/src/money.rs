//! # Money Module
//!
//! Provides the `Money` and `Quantity` types for handling amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Summing a till over a day of sales drifts by fractions of a cent,      │
//! │  and the register close then reports a difference nobody can find.      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Fixed-Point Quantities                   │
//! │    Money     = i64 cents         "9.99"  → 999                          │
//! │    Quantity  = i64 thousandths   "0.66"  → 660  (weighed produce)       │
//! │    Money × Quantity rounds ONCE, half away from zero                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Money travels as a decimal string with two fraction digits (`"109.00"`).
//! Browser clients post plain JSON numbers too, so deserialization accepts
//! strings, integers and floats; floats are read through their shortest
//! decimal representation and rounded to cents.
//!
//! ## Usage
//! ```rust
//! use pdv_core::money::{Money, Quantity};
//!
//! let price = Money::from_cents(999);                    // 9.99
//! let weight: Quantity = "0.66".parse().unwrap();        // 0.66 kg
//! assert_eq!(price.multiply_quantity(weight).cents(), 659);
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ValidationError;

/// Fraction digits carried by [`Money`].
const MONEY_SCALE: u32 = 2;

/// Fraction digits carried by [`Quantity`].
const QUANTITY_SCALE: u32 = 3;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents (the smallest unit of the currency).
///
/// ## Design Decisions
/// - **i64 (signed)**: cash withdrawals and register differences are negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Custom serde**: decimal string on the way out, lenient on the way in
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► SaleItem.price × quantity ──► Sale.total
///                                                    │
/// CashTransaction.amount ──┐                         ▼ (cash sales only)
///                          └──────────────► RegisterSummary.system_balance
///                                                    │
///                          manual count ──► DailyRegister.difference
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use pdv_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50, not -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (truncated toward zero).
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns the larger of `self` and zero.
    ///
    /// Change owed to a customer is `(received - total).max_zero()`.
    #[inline]
    pub const fn max_zero(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }

    /// Multiplies a unit price by a (possibly fractional) quantity.
    ///
    /// ## Rounding
    /// The exact product is `cents × thousandths / 1000`; it is rounded once,
    /// half away from zero.
    ///
    /// Saturates at the `i64` range. Prices and quantities that passed
    /// validation are far below it; use [`Money::checked_multiply_quantity`]
    /// for unvalidated input.
    ///
    /// ## Example
    /// ```rust
    /// use pdv_core::money::{Money, Quantity};
    ///
    /// let apples = Money::from_cents(999);
    /// let line = apples.multiply_quantity(Quantity::from_thousandths(660));
    /// assert_eq!(line.cents(), 659); // 6.5934 → 6.59
    /// ```
    pub fn multiply_quantity(&self, qty: Quantity) -> Money {
        self.checked_multiply_quantity(qty).unwrap_or(
            if self.is_negative() != (qty.thousandths() < 0) {
                Money(i64::MIN)
            } else {
                Money(i64::MAX)
            },
        )
    }

    /// Like [`Money::multiply_quantity`], `None` when the result does not fit.
    pub fn checked_multiply_quantity(&self, qty: Quantity) -> Option<Money> {
        let exact = self.0 as i128 * qty.thousandths() as i128;
        i64::try_from(div_round_half_away(exact, 1000)).ok().map(Money)
    }

    /// `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// `None` on overflow.
    #[inline]
    pub const fn checked_sub(self, other: Money) -> Option<Money> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Sums amounts, `None` if any partial sum overflows.
    pub fn checked_sum<I>(amounts: I) -> Option<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, amount| acc.checked_add(amount))
    }

    /// True when `self` and `other` differ by at most `tolerance`.
    #[inline]
    pub fn within(&self, other: Money, tolerance: Money) -> bool {
        self.0.abs_diff(other.0) <= tolerance.0.unsigned_abs()
    }

    /// Converts a float received at the API boundary into cents.
    ///
    /// The float is read through its shortest decimal representation so that
    /// `2.675` becomes 268 cents rather than the 267 a naive `× 100` yields.
    pub fn from_f64_rounded(value: f64) -> Result<Money, ValidationError> {
        if !value.is_finite() {
            return Err(invalid_amount("must be a finite number"));
        }
        parse_scaled(&value.to_string(), MONEY_SCALE, true)
            .map(Money)
            .map_err(invalid_amount)
    }

    /// Exact money sum of `cents × thousandths` products, rounded once.
    ///
    /// Used for sale totals: summing the unrounded line products and rounding
    /// at the end keeps the total within one cent of the true value no matter
    /// how many weighed lines a sale has.
    ///
    /// Returns `None` when the total does not fit in a `Money`.
    pub fn sum_of_lines<I>(lines: I) -> Option<Money>
    where
        I: IntoIterator<Item = (Money, Quantity)>,
    {
        let exact = lines.into_iter().try_fold(0i128, |acc, (price, qty)| {
            acc.checked_add(price.0 as i128 * qty.thousandths() as i128)
        })?;
        i64::try_from(div_round_half_away(exact, 1000)).ok().map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Displays money as a plain decimal string (`"-9.00"`).
///
/// Currency symbols and locale separators are the client's concern.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    /// Parses `"9"`, `"9.5"`, `"-9.00"`. More than two fraction digits is an
    /// error rather than a silent rounding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_scaled(s, MONEY_SCALE, false)
            .map(Money)
            .map_err(invalid_amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal amount as string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(100)
            .map(Money)
            .ok_or_else(|| E::custom("amount out of range"))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .map_err(|_| E::custom("amount out of range"))
            .and_then(|v| self.visit_i64(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_f64_rounded(v).map_err(E::custom)
    }
}

// =============================================================================
// Quantity Type
// =============================================================================

/// A line quantity in thousandths of a unit.
///
/// Whole items are multiples of 1000; weighed goods use the fraction
/// (`0.66` kg is 660).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Quantity(i64);

impl Quantity {
    /// Creates a quantity of whole units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Quantity(units * 1000)
    }

    /// Creates a quantity from thousandths of a unit.
    #[inline]
    pub const fn from_thousandths(thousandths: i64) -> Self {
        Quantity(thousandths)
    }

    /// Returns the raw fixed-point value.
    #[inline]
    pub const fn thousandths(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_whole(&self) -> bool {
        self.0 % 1000 == 0
    }

    /// Converts a float received at the API boundary, rounding to thousandths.
    pub fn from_f64_rounded(value: f64) -> Result<Quantity, ValidationError> {
        if !value.is_finite() {
            return Err(invalid_quantity("must be a finite number"));
        }
        parse_scaled(&value.to_string(), QUANTITY_SCALE, true)
            .map(Quantity)
            .map_err(invalid_quantity)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = (self.0 / 1000).abs();
        let frac = (self.0 % 1000).abs();
        if frac == 0 {
            return write!(f, "{}{}", sign, whole);
        }
        let digits = format!("{:03}", frac);
        write!(f, "{}{}.{}", sign, whole, digits.trim_end_matches('0'))
    }
}

impl FromStr for Quantity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_scaled(s, QUANTITY_SCALE, false)
            .map(Quantity)
            .map_err(invalid_quantity)
    }
}

impl Add for Quantity {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Quantity(self.0 + other.0)
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_whole() {
            serializer.serialize_i64(self.0 / 1000)
        } else {
            serializer.serialize_f64(self.0 as f64 / 1000.0)
        }
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(QuantityVisitor)
    }
}

struct QuantityVisitor;

impl<'de> Visitor<'de> for QuantityVisitor {
    type Value = Quantity;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a quantity as number or decimal string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Quantity, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Quantity, E> {
        v.checked_mul(1000)
            .map(Quantity)
            .ok_or_else(|| E::custom("quantity out of range"))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Quantity, E> {
        i64::try_from(v)
            .map_err(|_| E::custom("quantity out of range"))
            .and_then(|v| self.visit_i64(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Quantity, E> {
        Quantity::from_f64_rounded(v).map_err(E::custom)
    }
}

// =============================================================================
// Fixed-Point Helpers
// =============================================================================

/// Integer division rounding half away from zero. `d` must be positive.
fn div_round_half_away(n: i128, d: i128) -> i128 {
    let q = n / d;
    let r = n % d;
    if r.abs() * 2 >= d {
        q + n.signum()
    } else {
        q
    }
}

/// Parses a plain decimal string into an integer scaled by `10^scale`.
///
/// Digits past `scale` are rounded half away from zero when `round` is set
/// and rejected otherwise (trailing zeros are always accepted).
fn parse_scaled(input: &str, scale: u32, round: bool) -> Result<i64, &'static str> {
    let s = input.trim();
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));

    if int_part.is_empty() && frac_part.is_empty() {
        return Err("expected a decimal number");
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit()) || !frac_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err("expected a decimal number");
    }

    let scale = scale as usize;
    let (kept, dropped) = frac_part.split_at(frac_part.len().min(scale));
    if !round && dropped.bytes().any(|b| b != b'0') {
        return Err("too many fraction digits");
    }

    let limit = i64::MAX as i128;
    let mut value: i128 = 0;
    for b in int_part.bytes().chain(kept.bytes()) {
        value = value * 10 + (b - b'0') as i128;
        if value > limit {
            return Err("value out of range");
        }
    }
    for _ in kept.len()..scale {
        value *= 10;
    }
    if round && dropped.bytes().next().is_some_and(|b| b >= b'5') {
        value += 1;
    }
    if value > limit {
        return Err("value out of range");
    }

    let value = value as i64;
    Ok(if negative { -value } else { value })
}

fn invalid_amount(reason: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: "amount".to_string(),
        reason: reason.to_string(),
    }
}

fn invalid_quantity(reason: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: "quantity".to_string(),
        reason: reason.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.units(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-900).to_string(), "-9.00");
        assert_eq!(Money::from_cents(-50).to_string(), "-0.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!("9".parse::<Money>().unwrap().cents(), 900);
        assert_eq!("9.5".parse::<Money>().unwrap().cents(), 950);
        assert_eq!("-9.00".parse::<Money>().unwrap().cents(), -900);
        assert_eq!(" 0.01 ".parse::<Money>().unwrap().cents(), 1);
        assert_eq!(".50".parse::<Money>().unwrap().cents(), 50);
        assert_eq!("2.500".parse::<Money>().unwrap().cents(), 250);

        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1.999".parse::<Money>().is_err());
        assert!("1,50".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
        assert_eq!((b - a).max_zero(), Money::zero());
        assert_eq!((a - b).max_zero().cents(), 500);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_multiply_quantity_rounds_half_away_from_zero() {
        let apples = Money::from_cents(999);
        assert_eq!(apples.multiply_quantity(Quantity::from_thousandths(660)).cents(), 659);

        // 0.01 × 0.5 = 0.005 → 0.01
        assert_eq!(Money::from_cents(1).multiply_quantity(Quantity::from_thousandths(500)).cents(), 1);
        // -0.01 × 0.5 = -0.005 → -0.01
        assert_eq!(Money::from_cents(-1).multiply_quantity(Quantity::from_thousandths(500)).cents(), -1);

        assert_eq!(Money::from_cents(250).multiply_quantity(Quantity::from_units(2)).cents(), 500);
    }

    #[test]
    fn test_sum_of_lines_rounds_once() {
        // 8.90 + 7.99 + 9.99 × 0.66 = 23.4834
        let total = Money::sum_of_lines([
            (Money::from_cents(890), Quantity::from_units(1)),
            (Money::from_cents(799), Quantity::from_units(1)),
            (Money::from_cents(999), Quantity::from_thousandths(660)),
        ])
        .unwrap();
        assert_eq!(total.cents(), 2348);

        // Three lines of 0.004 each: per-line rounding would give 0.00,
        // rounding the exact sum gives 0.01.
        let tiny = Money::sum_of_lines(
            std::iter::repeat((Money::from_cents(1), Quantity::from_thousandths(400))).take(3),
        )
        .unwrap();
        assert_eq!(tiny.cents(), 1);
    }

    #[test]
    fn test_within_tolerance() {
        let a = Money::from_cents(900);
        assert!(a.within(Money::from_cents(901), Money::from_cents(1)));
        assert!(a.within(Money::from_cents(899), Money::from_cents(1)));
        assert!(!a.within(Money::from_cents(902), Money::from_cents(1)));
        assert!(!Money::from_cents(i64::MAX).within(Money::from_cents(i64::MIN), Money::from_cents(1)));
    }

    #[test]
    fn test_checked_arithmetic_reports_overflow() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max.checked_add(Money::from_cents(1)), None);
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)), None);
        assert_eq!(
            Money::checked_sum([Money::from_cents(i64::MAX), Money::from_cents(i64::MAX)]),
            None
        );
        assert_eq!(
            Money::checked_sum([Money::from_cents(150), Money::from_cents(-50)]),
            Some(Money::from_cents(100))
        );
    }

    #[test]
    fn test_line_products_do_not_wrap() {
        let huge = Money::from_cents(i64::MAX / 2);
        let qty = Quantity::from_thousandths(9_999_000);

        assert_eq!(huge.checked_multiply_quantity(qty), None);
        assert_eq!(huge.multiply_quantity(qty).cents(), i64::MAX);
        assert_eq!(Money::sum_of_lines([(huge, qty)]), None);
        assert_eq!(Money::sum_of_lines([(huge, qty), (huge, qty), (huge, qty)]), None);
    }

    #[test]
    fn test_money_json() {
        let json = serde_json::to_string(&Money::from_cents(10900)).unwrap();
        assert_eq!(json, "\"109.00\"");

        let from_str: Money = serde_json::from_str("\"2.50\"").unwrap();
        let from_int: Money = serde_json::from_str("20").unwrap();
        let from_float: Money = serde_json::from_str("2.675").unwrap();
        assert_eq!(from_str.cents(), 250);
        assert_eq!(from_int.cents(), 2000);
        assert_eq!(from_float.cents(), 268);

        assert!(serde_json::from_str::<Money>("\"1.234\"").is_err());
        assert!(serde_json::from_str::<Money>("true").is_err());
    }

    #[test]
    fn test_quantity_parse_and_display() {
        assert_eq!("0.66".parse::<Quantity>().unwrap().thousandths(), 660);
        assert_eq!("2".parse::<Quantity>().unwrap(), Quantity::from_units(2));
        assert!("0.0005".parse::<Quantity>().is_err());

        assert_eq!(Quantity::from_thousandths(660).to_string(), "0.66");
        assert_eq!(Quantity::from_thousandths(1250).to_string(), "1.25");
        assert_eq!(Quantity::from_units(3).to_string(), "3");
    }

    #[test]
    fn test_quantity_json() {
        assert_eq!(serde_json::to_string(&Quantity::from_units(2)).unwrap(), "2");
        assert_eq!(serde_json::to_string(&Quantity::from_thousandths(660)).unwrap(), "0.66");

        let whole: Quantity = serde_json::from_str("2").unwrap();
        let weighed: Quantity = serde_json::from_str("0.66").unwrap();
        assert_eq!(whole.thousandths(), 2000);
        assert_eq!(weighed.thousandths(), 660);
    }
}
