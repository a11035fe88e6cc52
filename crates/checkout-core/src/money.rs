//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    int(100 * 0.29) = 28   ❌ (100 * 0.29 = 28.999999999999996)          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units + basis-point rates                  │
//! │    100 * 2900 / 10000 = 29   ✅ exact, then floored                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::Money;
//! use checkout_core::types::Rate;
//!
//! let subtotal = Money::from_cents(150);
//! let discount = subtotal.apply_rate(Rate::from_bps(500)).unwrap();
//! assert_eq!(discount.cents(), 7); // floor(7.5)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::types::Rate;
use crate::BPS_DENOMINATOR;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i128 (signed)**: products, sums and rate products all go through
///   checked arithmetic, so a huge cart fails loudly instead of wrapping
/// - **Single field tuple struct**: serializes as a bare JSON number, which
///   is also how the TypeScript binding types it
///
/// ## Where Money is Used
/// ```text
/// LineItem.price × qty ──► subtotal ──► discount ──► total_after_discount
///                                                          │
///                                                          ▼
///                                                   tax ──► total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i128);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i128) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i128 {
        self.0
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

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Subtracts `other`, returning `None` on overflow.
    #[inline]
    pub const fn checked_sub(self, other: Money) -> Option<Money> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Multiplies a unit price by a quantity, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3).unwrap();
    /// assert_eq!(line_total.cents(), 897); // $8.97
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i128) -> Option<Money> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Multiplies the amount by a rate and floors the result.
    ///
    /// ## Implementation
    /// Pure integer math: `floor(amount * bps / 10000)`. Floor division
    /// (`div_euclid`) keeps the "round toward negative infinity" behaviour
    /// for negative amounts too.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    /// use checkout_core::types::Rate;
    ///
    /// let after_discount = Money::from_cents(143);
    /// let tax = after_discount.apply_rate(Rate::from_bps(2100)).unwrap();
    /// // 143 × 21% = 30.03 → 30
    /// assert_eq!(tax.cents(), 30);
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Option<Money> {
        self.0
            .checked_mul(i128::from(rate.bps()))
            .map(|scaled| Money(scaled.div_euclid(BPS_DENOMINATOR)))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows the amount with two decimal places.
///
/// ## Note
/// Currency codes travel separately on the receipt, so no symbol is printed.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
