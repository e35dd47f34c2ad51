//! Value predicates shared by the accessors

use serde_json::Value;

/// True iff `s` parses as a finite base-10 integer or decimal
pub fn is_numeric_string(s: &str) -> bool {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return false;
    }
    // f64's parser also accepts "inf" and "nan"; require a digit
    trimmed.bytes().any(|b| b.is_ascii_digit())
        && trimmed.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

/// True iff `value` is a sequence whose elements are all mappings
///
/// An empty sequence counts as true.
pub fn is_sequence_of_mappings(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().all(Value::is_object),
        _ => false,
    }
}

/// Parse a token as a sequence index
///
/// Only canonical non-negative integers (`"0"`, `"12"`) qualify; `"01"`,
/// `"-1"` and `"1.5"` are numeric strings but address no element.
pub fn as_index(token: &str) -> Option<usize> {
    let index = token.parse::<usize>().ok()?;
    (index.to_string() == token).then_some(index)
}

/// Human-readable type name for a JSON value
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
