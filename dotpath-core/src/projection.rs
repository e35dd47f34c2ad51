//! Array projection: read one key across every element of a sequence

use serde_json::Value;

/// Replace each element of `items` with its value at `key`
///
/// Nested sequences are projected recursively so nesting depth is kept.
/// Nulls stay null. Elements without the key, and leaves, become null.
pub fn project(items: &[Value], key: &str) -> Value {
    Value::Array(
        items
            .iter()
            .map(|item| match item {
                Value::Array(nested) => project(nested, key),
                Value::Object(map) => map.get(key).cloned().unwrap_or(Value::Null),
                _ => Value::Null,
            })
            .collect(),
    )
}
