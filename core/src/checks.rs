//! Small predicates over response JSON shared by the storefront scenarios.

use std::time::Duration;

use serde_json::Value;

/// Names from `fields` that are not keys of `value`. Non-objects miss all of
/// them.
pub fn missing_fields(value: &Value, fields: &[&str]) -> Vec<String> {
    fields
        .iter()
        .filter(|field| value.get(**field).is_none())
        .map(|field| field.to_string())
        .collect()
}

/// A price is a number in `(0, max]`.
pub fn price_within(price: &Value, max: f64) -> bool {
    price.as_f64().is_some_and(|p| p > 0.0 && p <= max)
}

/// `{"rate": 0..=5, "count": >= 0}`.
pub fn rating_valid(rating: &Value) -> bool {
    let rate_ok = rating["rate"].as_f64().is_some_and(|r| (0.0..=5.0).contains(&r));
    let count_ok = rating["count"].as_f64().is_some_and(|c| c >= 0.0);
    rate_ok && count_ok
}

/// One `@`, a non-empty local part, and a dotted domain.
pub fn email_plausible(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.contains('@') && domain.contains('.'),
        None => false,
    }
}

/// Whether `elapsed` is strictly below `threshold`.
pub fn within(elapsed: Duration, threshold: Duration) -> bool {
    elapsed < threshold
}
