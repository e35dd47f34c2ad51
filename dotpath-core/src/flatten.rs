//! Flatten a nested tree into a single-level map of dot paths

use crate::accessor::set;
use crate::error::Result;
use serde_json::{Map, Value};

/// Flatten `tree` into `path → leaf` entries
///
/// Non-empty mappings and sequences are expanded (sequence indices become
/// path segments). Empty containers are kept as leaf values. Keys are
/// joined with `.` as-is; dots inside keys are not escaped.
pub fn flatten(tree: &Value) -> Map<String, Value> {
    let mut out = Map::new();
    flatten_into(tree, None, &mut out);
    out
}

fn flatten_into(value: &Value, prefix: Option<&str>, out: &mut Map<String, Value>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_entry(key, child, prefix, out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_entry(&index.to_string(), child, prefix, out);
            }
        }
        _ => {}
    }
}

fn flatten_entry(key: &str, child: &Value, prefix: Option<&str>, out: &mut Map<String, Value>) {
    // an empty prefix (from an empty root key) is dropped, not joined
    let output_key = match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}.{key}"),
        _ => key.to_string(),
    };

    if is_expandable(child) {
        flatten_into(child, Some(&output_key), out);
    } else {
        out.insert(output_key, child.clone());
    }
}

fn is_expandable(value: &Value) -> bool {
    match value {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => false,
    }
}

/// Rebuild a tree from flattened entries
///
/// Each key is applied with [`set`] onto an empty mapping, so numeric
/// segments create mapping keys, not sequence elements, and dotted keys
/// must be escaped to survive.
pub fn unflatten(flat: &Map<String, Value>) -> Result<Value> {
    let mut tree = Value::Object(Map::new());
    for (path, value) in flat {
        set(&mut tree, path, value.clone())?;
    }
    Ok(tree)
}
