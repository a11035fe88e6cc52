//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                      │
//! │  ├── CheckoutError    - Checkout failures (unknown coupon, overflow)   │
//! │  └── ValidationError  - Request shape/value failures                   │
//! │                                                                         │
//! │  checkout-cli errors (app)                                             │
//! │  └── ConfigError      - Settings could not be loaded                   │
//! │                                                                         │
//! │  Flow: ValidationError → CheckoutError → exit code / response          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is a *request* error: the caller's input was wrong.
//! Retrying the same input repeats the same failure.

use thiserror::Error;

// =============================================================================
// Checkout Error
// =============================================================================

/// Errors returned by the checkout pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// The request failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The coupon code is not in the rule table.
    ///
    /// ## User Workflow
    /// ```text
    /// coupon: "BOGUS"
    ///      │
    ///      ▼
    /// lookup in CouponTable ── miss ──► UnknownCoupon("BOGUS")
    ///      │
    ///      ▼
    /// Checkout aborts. No silent "no discount" fallback.
    /// ```
    #[error("Unknown coupon: {0}")]
    UnknownCoupon(String),

    /// An amount did not fit the 128-bit money type.
    #[error("Order amount is too large to compute")]
    AmountOverflow,
}

impl CheckoutError {
    /// Stable machine-readable code for wrappers that map errors to responses.
    pub fn code(&self) -> &'static str {
        match self {
            CheckoutError::Validation(e) => e.code(),
            CheckoutError::UnknownCoupon(_) => "UNKNOWN_COUPON",
            CheckoutError::AmountOverflow => "AMOUNT_OVERFLOW",
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Validation stops at the first violation; errors are never aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent or null.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A field exists but has the wrong shape (e.g. items is not a list).
    #[error("{0} has an invalid type")]
    InvalidType(&'static str),

    /// The items list has no elements.
    #[error("items must not be empty")]
    EmptyItems,

    /// A numeric field is zero or negative.
    #[error("{0} must be positive")]
    InvalidValue(&'static str),

    /// A positive integer field is wider than 128 bits.
    #[error("{0} is too large")]
    OutOfRange(&'static str),
}

impl ValidationError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "MISSING_FIELD",
            ValidationError::InvalidType(_) => "INVALID_TYPE",
            ValidationError::EmptyItems => "EMPTY_ITEMS",
            ValidationError::InvalidValue(_) => "INVALID_VALUE",
            ValidationError::OutOfRange(_) => "OUT_OF_RANGE",
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CheckoutError.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

// =============================================================================
// Unit Tests
// =============================================================================
