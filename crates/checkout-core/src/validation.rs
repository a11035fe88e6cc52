//! # Validation Module
//!
//! Turns an incoming request into a [`ValidatedOrder`] or the first
//! [`ValidationError`] found.
//!
//! ## Validation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  user_id present? ──► items present? ──► items a list? ──► non-empty?   │
//! │                                                               │         │
//! │        ┌──────────────────────────────────────────────────────┘         │
//! │        ▼                                                                │
//! │  for each item, left to right:                                          │
//! │    object? ──► price key? ──► qty key? ──► price > 0? ──► qty > 0?      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  coupon a string? ──► currency a string? ──► resolve currency           │
//! │                                                                         │
//! │  The first failure aborts. Errors are never aggregated.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::validation::{parse_request, validate_request};
//! use serde_json::json;
//!
//! let request = json!({ "user_id": 1, "items": [{ "price": 100, "qty": 2 }] });
//! let order = validate_request(parse_request(&request), "USD").unwrap();
//! assert_eq!(order.currency, "USD");
//! ```

use serde_json::Value;

use crate::error::ValidationError;
use crate::types::{LineItem, OrderRequest, UserId, ValidatedOrder};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Parse
// =============================================================================

/// The four request fields, extracted but not yet checked.
///
/// A field is `None` when the key is absent. An explicit JSON `null` is kept
/// as `Some(Value::Null)` here and treated as absent by validation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawRequest<'a> {
    pub user_id: Option<&'a Value>,
    pub items: Option<&'a Value>,
    pub coupon: Option<&'a Value>,
    pub currency: Option<&'a Value>,
}

/// Extracts the request fields. Performs no validation.
///
/// A document that is not a JSON object yields a request with every field
/// absent, which validation then reports as a missing `user_id`.
pub fn parse_request(request: &Value) -> RawRequest<'_> {
    match request.as_object() {
        Some(fields) => RawRequest {
            user_id: fields.get("user_id"),
            items: fields.get("items"),
            coupon: fields.get("coupon"),
            currency: fields.get("currency"),
        },
        None => RawRequest::default(),
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

// =============================================================================
// Untyped Validation
// =============================================================================

/// Validates a parsed JSON request.
///
/// `default_currency` is used when the request carries no currency.
pub fn validate_request(
    raw: RawRequest<'_>,
    default_currency: &str,
) -> ValidationResult<ValidatedOrder> {
    let user_id = present(raw.user_id).ok_or(ValidationError::MissingField("user_id"))?;
    let items = present(raw.items).ok_or(ValidationError::MissingField("items"))?;
    let items = items
        .as_array()
        .ok_or(ValidationError::InvalidType("items"))?;

    if items.is_empty() {
        return Err(ValidationError::EmptyItems);
    }

    let items = items
        .iter()
        .map(validate_line_item)
        .collect::<ValidationResult<Vec<_>>>()?;

    let coupon = optional_string(raw.coupon, "coupon")?;
    let currency = optional_string(raw.currency, "currency")?;

    Ok(ValidatedOrder {
        user_id: UserId::from_value(user_id.clone()),
        items,
        coupon: normalize_coupon(coupon.map(str::to_string)),
        currency: resolve_currency(currency.map(str::to_string), default_currency),
    })
}

/// Validates a single JSON line item.
///
/// ## Rules
/// - Must be an object
/// - Must carry both `price` and `qty` (checked before any value)
/// - Both must be integers greater than zero
pub fn validate_line_item(item: &Value) -> ValidationResult<LineItem> {
    let fields = item
        .as_object()
        .ok_or(ValidationError::InvalidType("items"))?;

    let price = fields
        .get("price")
        .ok_or(ValidationError::MissingField("price"))?;
    let qty = fields
        .get("qty")
        .ok_or(ValidationError::MissingField("qty"))?;

    let price = positive_integer(price, "price")?;
    let qty = positive_integer(qty, "qty")?;

    Ok(LineItem::new(price, qty))
}

/// Reads a strictly positive integer field.
///
/// Non-numbers and numbers written with a fraction or exponent are the wrong
/// type. Integers of any width are read from their digits: zero or negative
/// is [`ValidationError::InvalidValue`], wider than `i128` is
/// [`ValidationError::OutOfRange`].
fn positive_integer(value: &Value, field: &'static str) -> ValidationResult<i128> {
    let Value::Number(number) = value else {
        return Err(ValidationError::InvalidType(field));
    };

    if let Some(n) = number.as_i64() {
        let n = i128::from(n);
        validate_positive(n, field)?;
        return Ok(n);
    }
    if let Some(n) = number.as_u64() {
        return Ok(i128::from(n));
    }

    // wider than 64 bits: only the literal digits are left
    let literal = number.to_string();
    let (negative, digits) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal.as_str()),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidType(field));
    }
    if negative {
        return Err(ValidationError::InvalidValue(field));
    }

    let n = digits
        .parse::<i128>()
        .map_err(|_| ValidationError::OutOfRange(field))?;
    validate_positive(n, field)?;
    Ok(n)
}

fn optional_string<'a>(
    value: Option<&'a Value>,
    field: &'static str,
) -> ValidationResult<Option<&'a str>> {
    match present(value) {
        None => Ok(None),
        Some(v) => v
            .as_str()
            .map(Some)
            .ok_or(ValidationError::InvalidType(field)),
    }
}

// =============================================================================
// Typed Validation
// =============================================================================

/// Validates a typed request.
///
/// Shape errors are impossible here, so only the emptiness and positivity
/// rules apply, in the same order as the JSON path.
///
/// ## Example
/// ```rust
/// use checkout_core::types::{LineItem, OrderRequest};
/// use checkout_core::validation::validate_order;
/// use checkout_core::ValidationError;
///
/// let request = OrderRequest::new(7, vec![LineItem::new(0, 1)]);
/// assert_eq!(
///     validate_order(request, "USD"),
///     Err(ValidationError::InvalidValue("price"))
/// );
/// ```
pub fn validate_order(
    request: OrderRequest,
    default_currency: &str,
) -> ValidationResult<ValidatedOrder> {
    if request.user_id.as_value().is_null() {
        return Err(ValidationError::MissingField("user_id"));
    }

    if request.items.is_empty() {
        return Err(ValidationError::EmptyItems);
    }

    for item in &request.items {
        validate_positive(item.price, "price")?;
        validate_positive(item.qty, "qty")?;
    }

    Ok(ValidatedOrder {
        user_id: request.user_id,
        items: request.items,
        coupon: normalize_coupon(request.coupon),
        currency: resolve_currency(request.currency, default_currency),
    })
}

// =============================================================================
// Shared Rules
// =============================================================================

/// Validates that a price or quantity is greater than zero.
pub fn validate_positive(n: i128, field: &'static str) -> ValidationResult<()> {
    if n <= 0 {
        return Err(ValidationError::InvalidValue(field));
    }

    Ok(())
}

/// An empty coupon code means "no coupon".
fn normalize_coupon(coupon: Option<String>) -> Option<String> {
    coupon.filter(|code| !code.is_empty())
}

fn resolve_currency(currency: Option<String>, default_currency: &str) -> String {
    currency.unwrap_or_else(|| default_currency.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate(request: Value) -> ValidationResult<ValidatedOrder> {
        validate_request(parse_request(&request), "USD")
    }

    #[test]
    fn test_parse_request() {
        let request = json!({ "user_id": 1, "items": [], "coupon": null });
        let raw = parse_request(&request);
        assert_eq!(raw.user_id, Some(&json!(1)));
        assert_eq!(raw.items, Some(&json!([])));
        assert_eq!(raw.coupon, Some(&Value::Null));
        assert_eq!(raw.currency, None);

        assert_eq!(parse_request(&json!([1, 2])), RawRequest::default());
    }

    #[test]
    fn test_valid_request() {
        let order = validate(json!({
            "user_id": "u-1",
            "items": [{ "price": 100, "qty": 2 }, { "price": 5, "qty": 1 }],
            "coupon": "SAVE10",
            "currency": "EUR"
        }))
        .unwrap();

        assert_eq!(order.user_id, UserId::from("u-1"));
        assert_eq!(order.items, vec![LineItem::new(100, 2), LineItem::new(5, 1)]);
        assert_eq!(order.coupon.as_deref(), Some("SAVE10"));
        assert_eq!(order.currency, "EUR");
    }

    #[test]
    fn test_currency_defaults() {
        let items = json!([{ "price": 1, "qty": 1 }]);
        let order = validate(json!({ "user_id": 1, "items": items.clone() })).unwrap();
        assert_eq!(order.currency, "USD");

        let order = validate(json!({ "user_id": 1, "items": items.clone(), "currency": null })).unwrap();
        assert_eq!(order.currency, "USD");
    }

    #[test]
    fn test_missing_user_id() {
        let items = json!([{ "price": 1, "qty": 1 }]);
        assert_eq!(
            validate(json!({ "items": items.clone() })),
            Err(ValidationError::MissingField("user_id"))
        );
        assert_eq!(
            validate(json!({ "user_id": null, "items": items.clone() })),
            Err(ValidationError::MissingField("user_id"))
        );
        assert_eq!(validate(json!("nope")), Err(ValidationError::MissingField("user_id")));
    }

    #[test]
    fn test_items_container_checks() {
        assert_eq!(
            validate(json!({ "user_id": 1 })),
            Err(ValidationError::MissingField("items"))
        );
        assert_eq!(
            validate(json!({ "user_id": 1, "items": { "price": 1 } })),
            Err(ValidationError::InvalidType("items"))
        );
        assert_eq!(
            validate(json!({ "user_id": 1, "items": [] })),
            Err(ValidationError::EmptyItems)
        );
    }

    #[test]
    fn test_item_field_checks() {
        let cases = [
            (json!([{ "qty": 1 }]), ValidationError::MissingField("price")),
            (json!([{ "price": 1 }]), ValidationError::MissingField("qty")),
            (json!([{ "price": -5, "qty": 1 }]), ValidationError::InvalidValue("price")),
            (json!([{ "price": 0, "qty": 1 }]), ValidationError::InvalidValue("price")),
            (json!([{ "price": 1, "qty": 0 }]), ValidationError::InvalidValue("qty")),
            (json!([{ "price": "1", "qty": 1 }]), ValidationError::InvalidType("price")),
            (json!([{ "price": 1.5, "qty": 1 }]), ValidationError::InvalidType("price")),
            (json!([{ "price": 1, "qty": null }]), ValidationError::InvalidType("qty")),
            (json!([{ "price": 1e3, "qty": 1 }]), ValidationError::InvalidType("price")),
            (json!([7]), ValidationError::InvalidType("items")),
        ];

        for (items, expected) in cases {
            assert_eq!(
                validate(json!({ "user_id": 1, "items": items.clone() })),
                Err(expected.clone()),
                "items: {}",
                items
            );
        }
    }

    fn validate_text(request: &str) -> ValidationResult<ValidatedOrder> {
        validate(serde_json::from_str(request).unwrap())
    }

    #[test]
    fn test_integers_wider_than_64_bits() {
        let order = validate(json!({
            "user_id": 1,
            "items": [{ "price": u64::MAX, "qty": 1 }]
        }))
        .unwrap();
        assert_eq!(order.items, vec![LineItem::new(i128::from(u64::MAX), 1)]);

        let order = validate_text(
            r#"{"user_id": 1, "items": [{"price": 100000000000000000000, "qty": 30000000000000000000}]}"#,
        )
        .unwrap();
        assert_eq!(
            order.items,
            vec![LineItem::new(100_000_000_000_000_000_000, 30_000_000_000_000_000_000)]
        );
    }

    #[test]
    fn test_wide_integer_errors() {
        assert_eq!(
            validate_text(r#"{"user_id": 1, "items": [{"price": -100000000000000000000, "qty": 1}]}"#),
            Err(ValidationError::InvalidValue("price"))
        );
        // one past i128::MAX
        assert_eq!(
            validate_text(
                r#"{"user_id": 1, "items": [{"price": 1, "qty": 170141183460469231731687303715884105728}]}"#
            ),
            Err(ValidationError::OutOfRange("qty"))
        );
        assert_eq!(
            validate_text(r#"{"user_id": 1, "items": [{"price": 1.5e30, "qty": 1}]}"#),
            Err(ValidationError::InvalidType("price"))
        );
    }

    /// Presence of both keys is checked before either value.
    #[test]
    fn test_presence_before_positivity() {
        assert_eq!(
            validate(json!({ "user_id": 1, "items": [{ "price": -1 }] })),
            Err(ValidationError::MissingField("qty"))
        );
    }

    /// The first bad item wins, left to right.
    #[test]
    fn test_first_failure_is_reported() {
        assert_eq!(
            validate(json!({
                "user_id": 1,
                "items": [
                    { "price": 10, "qty": 1 },
                    { "price": 10, "qty": -1 },
                    { "price": -1, "qty": 1 }
                ]
            })),
            Err(ValidationError::InvalidValue("qty"))
        );
    }

    #[test]
    fn test_coupon_and_currency_types() {
        let items = json!([{ "price": 1, "qty": 1 }]);
        assert_eq!(
            validate(json!({ "user_id": 1, "items": items.clone(), "coupon": 10 })),
            Err(ValidationError::InvalidType("coupon"))
        );
        assert_eq!(
            validate(json!({ "user_id": 1, "items": items.clone(), "currency": ["USD"] })),
            Err(ValidationError::InvalidType("currency"))
        );

        let order = validate(json!({ "user_id": 1, "items": items.clone(), "coupon": "" })).unwrap();
        assert_eq!(order.coupon, None);
    }

    #[test]
    fn test_validate_order_typed() {
        let order = validate_order(
            OrderRequest::new(3, vec![LineItem::new(100, 2)]).with_coupon(""),
            "USD",
        )
        .unwrap();
        assert_eq!(order.coupon, None);
        assert_eq!(order.currency, "USD");

        assert_eq!(
            validate_order(OrderRequest::new(3, vec![]), "USD"),
            Err(ValidationError::EmptyItems)
        );
        assert_eq!(
            validate_order(OrderRequest::new(3, vec![LineItem::new(1, -2)]), "USD"),
            Err(ValidationError::InvalidValue("qty"))
        );
        assert_eq!(
            validate_order(
                OrderRequest::new(UserId::from_value(Value::Null), vec![LineItem::new(1, 1)]),
                "USD"
            ),
            Err(ValidationError::MissingField("user_id"))
        );
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(1, "qty").is_ok());
        assert!(validate_positive(0, "qty").is_err());
        assert!(validate_positive(-1, "qty").is_err());
    }
}
