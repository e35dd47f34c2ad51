//! Leaf path enumeration

use serde_json::Value;

/// List the dot path of every leaf reachable through mappings
///
/// Only mappings are descended into; sequences are reported as leaves
/// whatever their contents. Empty mappings contribute nothing. A sequence
/// root is enumerated by index.
pub fn enumerate_paths(tree: &Value) -> Vec<String> {
    let mut lead = Vec::new();
    let mut output = Vec::new();
    match tree {
        Value::Object(_) => collect(tree, &mut lead, &mut output),
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                visit(index.to_string(), child, &mut lead, &mut output);
            }
        }
        _ => {}
    }
    output
}

fn collect(value: &Value, lead: &mut Vec<String>, output: &mut Vec<String>) {
    if let Value::Object(map) = value {
        for (key, child) in map {
            visit(key.clone(), child, lead, output);
        }
    }
}

fn visit(key: String, child: &Value, lead: &mut Vec<String>, output: &mut Vec<String>) {
    if child.is_object() {
        lead.push(key);
        collect(child, lead, output);
        // reset lead for the next sibling
        lead.pop();
    } else if lead.is_empty() {
        output.push(key);
    } else {
        output.push(format!("{}.{}", lead.join("."), key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lists_leaf_paths_in_order() {
        let tree = json!({
            "a": {"b": 1, "c": {"d": null}},
            "e": "x"
        });
        assert_eq!(enumerate_paths(&tree), vec!["a.b", "a.c.d", "e"]);
    }

    #[test]
    fn sequences_are_leaves() {
        let tree = json!({"list": [{"a": 1}], "empty": [], "obj": {"inner": [1, 2]}});
        assert_eq!(enumerate_paths(&tree), vec!["list", "empty", "obj.inner"]);
    }

    #[test]
    fn empty_mapping_contributes_nothing() {
        let tree = json!({"a": {}, "b": 1});
        assert_eq!(enumerate_paths(&tree), vec!["b"]);
    }

    #[test]
    fn siblings_do_not_share_lead() {
        let tree = json!({"x": {"a": 1}, "y": {"b": {"c": 2}}, "z": 3});
        assert_eq!(enumerate_paths(&tree), vec!["x.a", "y.b.c", "z"]);
    }

    #[test]
    fn root_shapes() {
        assert!(enumerate_paths(&json!(1)).is_empty());
        assert!(enumerate_paths(&json!(null)).is_empty());
        assert_eq!(
            enumerate_paths(&json!([{"a": 1}, 2, [3]])),
            vec!["0.a", "1", "2"]
        );
    }
}
