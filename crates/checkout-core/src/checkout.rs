//! # Checkout Pipeline
//!
//! The calculator itself: a pure pipeline from request to receipt.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        process_checkout                                 │
//! │                                                                         │
//! │  parse ──► validate ──► subtotal ──► discount ──► tax+total ──► receipt │
//! │                │                        │                               │
//! │                ▼                        ▼                               │
//! │        ValidationError           UnknownCoupon                          │
//! │                                                                         │
//! │  Same input + same coupon table = same receipt. No side effects.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use checkout_core::Checkout;
//! use serde_json::json;
//!
//! let checkout = Checkout::standard();
//! let receipt = checkout
//!     .process_checkout(&json!({
//!         "user_id": 42,
//!         "items": [{ "price": 100, "qty": 2 }],
//!         "coupon": "SAVE10"
//!     }))
//!     .unwrap();
//!
//! assert_eq!(receipt.order_id, "42-1-X");
//! assert_eq!(receipt.discount.cents(), 20);
//! assert_eq!(receipt.tax.cents(), 37);
//! assert_eq!(receipt.total.cents(), 217);
//! ```

use serde_json::Value;
use tracing::debug;

use crate::coupon::CouponTable;
use crate::error::{CheckoutError, CheckoutResult};
use crate::money::Money;
use crate::types::{LineItem, OrderReceipt, OrderRequest, Rate, UserId, ValidatedOrder};
use crate::validation::{parse_request, validate_order, validate_request};
use crate::{DEFAULT_CURRENCY, ORDER_ID_SUFFIX, TAX_RATE_BPS};

// =============================================================================
// Configuration
// =============================================================================

/// Calculator settings that are not coupon rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Currency code used when a request carries none.
    pub default_currency: String,

    /// Tax rate applied to the discounted total.
    pub tax_rate: Rate,

    /// Floor for `subtotal - discount`.
    pub min_total_after_discount: Money,
}

impl Default for CheckoutConfig {
    /// USD, 21% tax, totals floored at zero.
    fn default() -> Self {
        CheckoutConfig {
            default_currency: DEFAULT_CURRENCY.to_string(),
            tax_rate: Rate::from_bps(TAX_RATE_BPS),
            min_total_after_discount: Money::zero(),
        }
    }
}

// =============================================================================
// Checkout
// =============================================================================

/// The checkout calculator.
///
/// Holds read-only configuration only, so one instance can serve any number
/// of threads by shared reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    config: CheckoutConfig,
    coupons: CouponTable,
}

impl Checkout {
    /// Creates a calculator from explicit configuration.
    pub fn new(config: CheckoutConfig, coupons: CouponTable) -> Self {
        Checkout { config, coupons }
    }

    /// Default configuration with the standard coupon table.
    pub fn standard() -> Self {
        Checkout::new(CheckoutConfig::default(), CouponTable::standard())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Returns the coupon table.
    pub fn coupons(&self) -> &CouponTable {
        &self.coupons
    }

    /// Runs the full pipeline on an untyped JSON request.
    pub fn process_checkout(&self, request: &Value) -> CheckoutResult<OrderReceipt> {
        let order = validate_request(parse_request(request), &self.config.default_currency)?;
        self.settle(order)
    }

    /// Runs the pipeline on a typed request.
    pub fn process_order(&self, request: OrderRequest) -> CheckoutResult<OrderReceipt> {
        let order = validate_order(request, &self.config.default_currency)?;
        self.settle(order)
    }

    /// Prices an already validated order.
    pub fn settle(&self, order: ValidatedOrder) -> CheckoutResult<OrderReceipt> {
        let items_count = order.items.len();
        let subtotal = calculate_subtotal(&order.items)?;
        let discount = calculate_discount(subtotal, order.coupon.as_deref(), &self.coupons)?;
        let (tax, total) = calculate_tax_and_total(subtotal, discount, &self.config)?;

        debug!(
            items_count,
            subtotal = %subtotal,
            discount = %discount,
            tax = %tax,
            total = %total,
            coupon = order.coupon.as_deref().unwrap_or("-"),
            "checkout priced"
        );

        Ok(OrderReceipt {
            order_id: generate_order_id(&order.user_id, items_count),
            user_id: order.user_id,
            currency: order.currency,
            subtotal,
            discount,
            tax,
            total,
            items_count,
        })
    }
}

// =============================================================================
// Pipeline Steps
// =============================================================================

/// Sums `price × qty` over every item.
///
/// Line products and the running sum are checked and report
/// [`CheckoutError::AmountOverflow`] rather than wrapping.
pub fn calculate_subtotal(items: &[LineItem]) -> CheckoutResult<Money> {
    items.iter().try_fold(Money::zero(), |acc, item| {
        item.line_total()
            .and_then(|line| acc.checked_add(line))
            .ok_or(CheckoutError::AmountOverflow)
    })
}

/// Computes the coupon discount on `subtotal`.
///
/// ## Behavior
/// - `None` → zero, the table is not consulted
/// - unknown code → [`CheckoutError::UnknownCoupon`]; the checkout aborts
/// - known code → the rule's discount
pub fn calculate_discount(
    subtotal: Money,
    coupon: Option<&str>,
    coupons: &CouponTable,
) -> CheckoutResult<Money> {
    let Some(code) = coupon else {
        return Ok(Money::zero());
    };

    let rule = coupons
        .get(code)
        .ok_or_else(|| CheckoutError::UnknownCoupon(code.to_string()))?;

    rule.discount(subtotal)
}

/// Returns `(tax, total)`.
///
/// ```text
/// total_after_discount = max(subtotal - discount, min_total_after_discount)
/// tax                  = floor(total_after_discount × tax_rate)
/// total                = total_after_discount + tax
/// ```
pub fn calculate_tax_and_total(
    subtotal: Money,
    discount: Money,
    config: &CheckoutConfig,
) -> CheckoutResult<(Money, Money)> {
    let total_after_discount = subtotal
        .checked_sub(discount)
        .ok_or(CheckoutError::AmountOverflow)?
        .max(config.min_total_after_discount);

    let tax = total_after_discount
        .apply_rate(config.tax_rate)
        .ok_or(CheckoutError::AmountOverflow)?;
    let total = total_after_discount
        .checked_add(tax)
        .ok_or(CheckoutError::AmountOverflow)?;

    Ok((tax, total))
}

/// Builds the derived order label `"{user_id}-{items_count}-X"`.
///
/// Deterministic, and deliberately not unique: two orders from the same user
/// with the same item count share an id.
pub fn generate_order_id(user_id: &UserId, items_count: usize) -> String {
    format!("{}-{}-{}", user_id, items_count, ORDER_ID_SUFFIX)
}

// =============================================================================
// Unit Tests
// =============================================================================
