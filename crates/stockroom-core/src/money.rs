//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    A $2.50 widget is 250 cents. 4 × 250 = 1000 cents = $10.00 EXACTLY. │
//! │    The summary total is always `sold_quantity × unit price` with no    │
//! │    rounding beyond currency precision.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(250); // $2.50
//!
//! // Arithmetic operations
//! let total = price * 4;              // $10.00
//!
//! // NEVER do this:
//! // let bad = Money::from_float(2.50); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
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

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(250); // $2.50
    /// let line_total = unit_price.multiply_quantity(4);
    /// assert_eq!(line_total.cents(), 1000); // $10.00
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Item: Widget $2.50
    /// Sold: 4
    ///      │
    ///      ▼
    /// multiply_quantity(4) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Summary Total: $10.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Currency Formatting
// =============================================================================

/// Locale-aware currency rendering rules.
///
/// The core never guesses the user's locale; the presentation layer picks a
/// `CurrencyFormat` and the summary renders through it. The default matches
/// en-US (`$1,234.56`).
///
/// ## Example
/// ```rust
/// use stockroom_core::money::{CurrencyFormat, Money};
///
/// let us = CurrencyFormat::default();
/// assert_eq!(us.format(Money::from_cents(123456)), "$1,234.56");
///
/// let de = CurrencyFormat::new("€", ",", ".", true);
/// assert_eq!(de.format(Money::from_cents(123456)), "1.234,56 €");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CurrencyFormat {
    /// Currency symbol ("$", "€", "Rs").
    pub symbol: String,
    /// Separator between major and minor units ("." for en-US).
    pub decimal_separator: String,
    /// Thousands separator for the major unit ("," for en-US).
    pub grouping_separator: String,
    /// Whether the symbol trails the amount ("1.234,56 €" vs "$1,234.56").
    pub symbol_trails: bool,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat {
            symbol: "$".to_string(),
            decimal_separator: ".".to_string(),
            grouping_separator: ",".to_string(),
            symbol_trails: false,
        }
    }
}

impl CurrencyFormat {
    /// Creates a currency format from its parts.
    pub fn new(symbol: &str, decimal: &str, grouping: &str, symbol_trails: bool) -> Self {
        CurrencyFormat {
            symbol: symbol.to_string(),
            decimal_separator: decimal.to_string(),
            grouping_separator: grouping.to_string(),
            symbol_trails,
        }
    }

    /// Renders a Money value under these rules.
    pub fn format(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let grouped = group_digits(amount.major().abs(), &self.grouping_separator);
        let digits = format!(
            "{}{}{:02}",
            grouped,
            self.decimal_separator,
            amount.minor()
        );
        if self.symbol_trails {
            format!("{}{} {}", sign, digits, self.symbol)
        } else {
            format!("{}{}{}", sign, self.symbol, digits)
        }
    }
}

/// Inserts a grouping separator every three digits of a non-negative number.
fn group_digits(value: i64, separator: &str) -> String {
    let raw = value.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    let offset = raw.len() % 3;
    for (i, c) in raw.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. Use [`CurrencyFormat`] for actual UI
/// display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.major().abs(), self.minor())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
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
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(10, 99);
        assert_eq!(money.cents(), 1099);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(250);
        let line_total = unit_price.multiply_quantity(4);
        assert_eq!(line_total.cents(), 1000);
    }

    #[test]
    fn test_multiply_by_zero_quantity() {
        // Selling zero units is a valid sale; the total is exactly zero
        let unit_price = Money::from_cents(250);
        assert_eq!(unit_price.multiply_quantity(0), Money::zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(!negative.is_zero());
        assert!(negative.is_negative());
        assert_eq!(negative.abs().cents(), 100);
    }

    #[test]
    fn test_currency_format_default_us() {
        let us = CurrencyFormat::default();
        assert_eq!(us.format(Money::from_cents(1000)), "$10.00");
        assert_eq!(us.format(Money::from_cents(123456)), "$1,234.56");
        assert_eq!(us.format(Money::from_cents(123456789)), "$1,234,567.89");
        assert_eq!(us.format(Money::from_cents(-550)), "-$5.50");
        assert_eq!(us.format(Money::zero()), "$0.00");
    }

    #[test]
    fn test_currency_format_trailing_symbol() {
        let de = CurrencyFormat::new("€", ",", ".", true);
        assert_eq!(de.format(Money::from_cents(123456)), "1.234,56 €");
        assert_eq!(de.format(Money::from_cents(99)), "0,99 €");
    }
}
