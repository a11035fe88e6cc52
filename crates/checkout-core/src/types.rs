//! # Domain Types
//!
//! Core domain types used by the checkout calculator.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  OrderRequest   │   │ ValidatedOrder  │   │  OrderReceipt   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  user_id        │──►│  user_id        │──►│  order_id       │       │
//! │  │  items          │   │  items (≥ 1)    │   │  subtotal       │       │
//! │  │  coupon?        │   │  coupon?        │   │  discount, tax  │       │
//! │  │  currency?      │   │  currency       │   │  total          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    LineItem     │   │      Rate       │                              │
//! │  │  price, qty     │   │  bps (u32)      │                              │
//! │  │  both > 0, i128 │   │  2100 = 21%     │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Rate
// =============================================================================

/// A multiplier represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2100 bps = 21% (the checkout tax rate), 1000 bps = a 10% coupon
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

/// Shows the rate as a percentage, e.g. `21%` or `8.25%`.
impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{}%", whole)
        } else {
            write!(f, "{}.{:02}%", whole, frac)
        }
    }
}

// =============================================================================
// User Id
// =============================================================================

/// Opaque customer identifier.
///
/// Any non-null JSON value is accepted. It is echoed back on the receipt
/// unchanged and rendered into the order id: strings without quotes, every
/// other value as its JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserId(#[ts(type = "string | number")] Value);

impl UserId {
    /// Wraps a raw JSON value. Callers are expected to have rejected `null`.
    pub fn from_value(value: Value) -> Self {
        UserId(value)
    }

    /// Returns the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId(Value::from(id))
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId(Value::from(id))
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        UserId(Value::from(id))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One line of an order: a unit price and a quantity.
///
/// Both are 128-bit so prices and quantities wider than 64 bits are priced
/// rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Unit price in minor currency units. Must be > 0.
    #[ts(type = "number")]
    pub price: i128,

    /// Quantity ordered. Must be > 0.
    #[ts(type = "number")]
    pub qty: i128,
}

impl LineItem {
    /// Creates a line item. No validation happens here.
    pub const fn new(price: i128, qty: i128) -> Self {
        LineItem { price, qty }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub const fn unit_price(&self) -> Money {
        Money::from_cents(self.price)
    }

    /// Calculates the line total (unit price × quantity).
    ///
    /// Returns `None` when the product does not fit 128 bits.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price().multiply_quantity(self.qty)
    }
}

// =============================================================================
// Order Request (typed form)
// =============================================================================

/// A checkout request built directly in Rust.
///
/// The untyped JSON path (`Checkout::process_checkout`) and this typed path
/// (`Checkout::process_order`) converge on the same [`ValidatedOrder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub user_id: UserId,
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub coupon: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl OrderRequest {
    /// Creates a request with no coupon and the default currency.
    pub fn new(user_id: impl Into<UserId>, items: Vec<LineItem>) -> Self {
        OrderRequest {
            user_id: user_id.into(),
            items,
            coupon: None,
            currency: None,
        }
    }

    /// Sets the coupon code.
    pub fn with_coupon(mut self, code: impl Into<String>) -> Self {
        self.coupon = Some(code.into());
        self
    }

    /// Sets the currency code.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

// =============================================================================
// Validated Order
// =============================================================================

/// A request that passed validation.
///
/// ## Invariants
/// - `items` is non-empty and every price and quantity is > 0
/// - `coupon` is `None` when the caller sent no code (or an empty one)
/// - `currency` is resolved, never missing
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedOrder {
    pub user_id: UserId,
    pub items: Vec<LineItem>,
    pub coupon: Option<String>,
    pub currency: String,
}

// =============================================================================
// Order Receipt
// =============================================================================

/// The checkout result.
///
/// All monetary fields are non-negative minor units and satisfy
/// `total = max(subtotal - discount, 0) + tax`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderReceipt {
    /// Derived label `"{user_id}-{items_count}-X"`, not globally unique.
    pub order_id: String,
    pub user_id: UserId,
    pub currency: String,
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub total: Money,
    pub items_count: usize,
}

// =============================================================================
// Unit Tests
// =============================================================================
