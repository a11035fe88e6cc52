//! # Coupon Rules
//!
//! Named discount policies and the immutable table that holds them.
//!
//! ## Rule Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Percentage { rate }                                                    │
//! │      discount = floor(subtotal × rate)                                  │
//! │                                                                         │
//! │  Tiered { high, low, threshold }                                        │
//! │      rate = subtotal ≥ threshold ? high : low                           │
//! │      discount = floor(subtotal × rate)                                  │
//! │                                                                         │
//! │  FixedConditional { value, fallback, min_for_value }                    │
//! │      discount = subtotal ≥ min_for_value ? value : fallback   (flat)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The table is built once at startup and handed to [`crate::Checkout`];
//! nothing mutates it afterwards.

use std::collections::BTreeMap;

use crate::error::{CheckoutError, CheckoutResult};
use crate::money::Money;
use crate::types::Rate;

// =============================================================================
// Coupon Rule
// =============================================================================

/// A discount policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponRule {
    /// A flat percentage of the subtotal.
    Percentage { rate: Rate },

    /// `high` once the subtotal reaches `threshold`, `low` below it.
    Tiered {
        high: Rate,
        low: Rate,
        threshold: Money,
    },

    /// A flat amount: `value` once the subtotal reaches `min_for_value`,
    /// `fallback` below it.
    FixedConditional {
        value: Money,
        fallback: Money,
        min_for_value: Money,
    },
}

impl CouponRule {
    /// Computes the discount this rule grants on `subtotal`.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::coupon::CouponRule;
    /// use checkout_core::money::Money;
    /// use checkout_core::types::Rate;
    ///
    /// let rule = CouponRule::Tiered {
    ///     high: Rate::from_bps(2000),
    ///     low: Rate::from_bps(500),
    ///     threshold: Money::from_cents(200),
    /// };
    /// assert_eq!(rule.discount(Money::from_cents(250)).unwrap().cents(), 50);
    /// assert_eq!(rule.discount(Money::from_cents(150)).unwrap().cents(), 7);
    /// ```
    pub fn discount(&self, subtotal: Money) -> CheckoutResult<Money> {
        match *self {
            CouponRule::Percentage { rate } => subtotal
                .apply_rate(rate)
                .ok_or(CheckoutError::AmountOverflow),
            CouponRule::Tiered {
                high,
                low,
                threshold,
            } => {
                let rate = if subtotal >= threshold { high } else { low };
                subtotal
                    .apply_rate(rate)
                    .ok_or(CheckoutError::AmountOverflow)
            }
            CouponRule::FixedConditional {
                value,
                fallback,
                min_for_value,
            } => Ok(if subtotal >= min_for_value {
                value
            } else {
                fallback
            }),
        }
    }
}

// =============================================================================
// Coupon Table
// =============================================================================

/// Immutable lookup of coupon code → rule.
///
/// Codes are matched exactly (case-sensitive).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CouponTable {
    rules: BTreeMap<String, CouponRule>,
}

impl CouponTable {
    /// Creates an empty table. Every coupon code will be unknown.
    pub fn new() -> Self {
        CouponTable::default()
    }

    /// The standard rule set: `SAVE10`, `SAVE20` and `VIP`.
    pub fn standard() -> Self {
        CouponTable::from_rules([
            (
                "SAVE10",
                CouponRule::Percentage {
                    rate: Rate::from_bps(1000),
                },
            ),
            (
                "SAVE20",
                CouponRule::Tiered {
                    high: Rate::from_bps(2000),
                    low: Rate::from_bps(500),
                    threshold: Money::from_cents(200),
                },
            ),
            (
                "VIP",
                CouponRule::FixedConditional {
                    value: Money::from_cents(50),
                    fallback: Money::from_cents(10),
                    min_for_value: Money::from_cents(100),
                },
            ),
        ])
    }

    /// Builds a table from `(code, rule)` pairs. A repeated code keeps the
    /// last rule.
    pub fn from_rules<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = (S, CouponRule)>,
        S: Into<String>,
    {
        CouponTable {
            rules: rules
                .into_iter()
                .map(|(code, rule)| (code.into(), rule))
                .collect(),
        }
    }

    /// Looks up a rule by code.
    pub fn get(&self, code: &str) -> Option<&CouponRule> {
        self.rules.get(code)
    }

    /// Iterates over `(code, rule)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CouponRule)> {
        self.rules.iter().map(|(code, rule)| (code.as_str(), rule))
    }

    /// Number of rules in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Checks if the table holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn discount(code: &str, subtotal: i128) -> i128 {
        CouponTable::standard()
            .get(code)
            .unwrap()
            .discount(Money::from_cents(subtotal))
            .unwrap()
            .cents()
    }

    #[test]
    fn test_standard_table() {
        let table = CouponTable::standard();
        assert_eq!(table.len(), 3);
        let codes: Vec<&str> = table.iter().map(|(code, _)| code).collect();
        assert_eq!(codes, vec!["SAVE10", "SAVE20", "VIP"]);
        assert!(table.get("save10").is_none());
    }

    #[test]
    fn test_percentage() {
        assert_eq!(discount("SAVE10", 200), 20);
        assert_eq!(discount("SAVE10", 199), 19);
        assert_eq!(discount("SAVE10", 9), 0);
    }

    #[test]
    fn test_tiered_threshold_is_inclusive() {
        assert_eq!(discount("SAVE20", 200), 40);
        assert_eq!(discount("SAVE20", 199), 9);
        assert_eq!(discount("SAVE20", 250), 50);
        assert_eq!(discount("SAVE20", 150), 7);
    }

    #[test]
    fn test_fixed_conditional() {
        assert_eq!(discount("VIP", 100), 50);
        assert_eq!(discount("VIP", 99), 10);
        assert_eq!(discount("VIP", 50), 10);
        // Flat amounts may exceed a tiny subtotal; the total clamps later.
        assert_eq!(discount("VIP", 3), 10);
    }

    #[test]
    fn test_from_rules_last_wins() {
        let table = CouponTable::from_rules([
            ("A", CouponRule::Percentage { rate: Rate::from_bps(100) }),
            ("A", CouponRule::Percentage { rate: Rate::from_bps(200) }),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get("A"),
            Some(&CouponRule::Percentage { rate: Rate::from_bps(200) })
        );
        assert!(CouponTable::new().is_empty());
    }
}
