//! # checkout-core: Pure Checkout Calculator
//!
//! This crate validates an order request, prices it, applies a coupon,
//! adds tax and returns a receipt. All of it as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Caller (checkout-cli, HTTP handler, ...)           │   │
//! │  │   load settings ──► read JSON ──► map errors to exit codes      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ checkout-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  coupon   │  │ validation│  │   │
//! │  │   │ Request   │  │   Money   │  │   Rule    │  │   parse   │  │   │
//! │  │   │ Receipt   │  │   Rate    │  │   Table   │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                          checkout                               │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (OrderRequest, LineItem, OrderReceipt, Rate)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`coupon`] - Coupon rules and the immutable coupon table
//! - [`validation`] - Request parsing and validation
//! - [`checkout`] - The pricing pipeline
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input + same coupon table = same receipt
//! 2. **No I/O**: configuration is passed in, never read from disk or env
//! 3. **Integer Money**: minor units and basis points, floored exactly
//! 4. **Explicit Errors**: typed, fail-fast, never logged and swallowed
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::{Checkout, LineItem, OrderRequest};
//!
//! let checkout = Checkout::standard();
//! let receipt = checkout
//!     .process_order(OrderRequest::new(1, vec![LineItem::new(100, 2)]))
//!     .unwrap();
//!
//! assert_eq!(receipt.subtotal.cents(), 200);
//! assert_eq!(receipt.tax.cents(), 42);
//! assert_eq!(receipt.total.cents(), 242);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod coupon;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{Checkout, CheckoutConfig};
pub use coupon::{CouponRule, CouponTable};
pub use error::{CheckoutError, CheckoutResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency code used when a request does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Tax rate in basis points (21%).
pub const TAX_RATE_BPS: u32 = 2100;

/// Fixed marker at the end of every order id.
pub const ORDER_ID_SUFFIX: &str = "X";

/// Basis points in one whole (100%).
pub const BPS_DENOMINATOR: i128 = 10_000;
