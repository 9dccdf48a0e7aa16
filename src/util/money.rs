use serde_json::Value;

/// Coerces a monetary JSON value to a number.
///
/// Numbers pass through, numeric strings parse, and anything else (missing,
/// null, junk) is 0. Monetary arithmetic must always run through this first;
/// the backend has been observed returning prices both as numbers and as
/// strings.
pub fn coerce(raw: Option<&Value>) -> f64 {
    match raw {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Renders an amount for display, always with two decimal places.
pub fn format_currency(amount: f64) -> String {
    format!("{:.2}", amount)
}
