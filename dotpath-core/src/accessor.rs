//! get / set / has / delete over dot-notation paths
//!
//! The wildcard `*` behaves differently per operation:
//!
//! - **get**: skipped; the walk continues on the same value. A following
//!   non-numeric key applied to a sequence projects that key across it.
//! - **set**: on a sequence, the rest of the path is written into every
//!   element and the walk ends.
//! - **delete**: on a sequence of mappings, the rest of the path is deleted
//!   from every element, then the walk continues on the same value.
//!
//! Anywhere else `*` is an ordinary key.

use crate::error::{ConfigError, Result, TraversalError};
use crate::limits::PathLimits;
use crate::path::{escape_segment, tokenize_with, Path, Segment};
use crate::predicates::{as_index, is_numeric_string, is_sequence_of_mappings, type_name};
use crate::projection::project;
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Accessor bound to a set of path limits
///
/// `DotPath::default()` is [`DotPath::permissive`], the accessor behind the
/// free functions. Use [`DotPath::new`] to enforce length and depth limits.
#[derive(Debug, Clone, Copy)]
pub struct DotPath {
    limits: PathLimits,
}

impl Default for DotPath {
    fn default() -> Self {
        Self::permissive()
    }
}

impl DotPath {
    /// Create an accessor, validating `limits` against the hard maximums
    pub fn new(limits: PathLimits) -> std::result::Result<Self, ConfigError> {
        limits.validate()?;
        Ok(Self { limits })
    }

    /// Accessor with no path length or depth cap
    ///
    /// Index padding stays bounded by the hard maximum gap.
    pub fn permissive() -> Self {
        Self {
            limits: PathLimits::permissive(),
        }
    }

    /// The limits in effect
    pub fn limits(&self) -> &PathLimits {
        &self.limits
    }

    /// Tokenize `path` under these limits
    pub fn tokenize(&self, path: &str) -> Path {
        tokenize_with(path, &self.limits)
    }

    /// Read the value at `path`; `None` when it does not resolve
    pub fn get(&self, tree: &Value, path: &str) -> Option<Value> {
        read(tree, &self.tokenize(path))
    }

    /// Read the value at `path`, falling back to `default` when undefined
    ///
    /// A path that tokenizes to nothing returns `None` regardless of the
    /// default. A `null` found along the way is returned as-is.
    pub fn get_or(&self, tree: &Value, path: &str, default: Value) -> Option<Value> {
        let parsed = self.tokenize(path);
        if parsed.is_empty() {
            return None;
        }
        Some(read(tree, &parsed).unwrap_or(default))
    }

    /// Whether `path` resolves to a value (including `null`)
    pub fn has(&self, tree: &Value, path: &str) -> bool {
        self.get(tree, path).is_some()
    }

    /// Write `value` at `path`, creating intermediate mappings
    pub fn set(&self, tree: &mut Value, path: &str, value: Value) -> Result<()> {
        let parsed = self.tokenize(path);
        let mut trail = Trail::new(path, self.limits.max_index_gap);
        write(tree, parsed.segments(), value, &mut trail)?;
        Ok(())
    }

    /// Remove the value at `path`; missing keys are a no-op
    pub fn delete(&self, tree: &mut Value, path: &str) -> Result<()> {
        let parsed = self.tokenize(path);
        let mut trail = Trail::new(path, self.limits.max_index_gap);
        remove(tree, parsed.segments(), &mut trail)?;
        Ok(())
    }
}

/// Read the value at `path`
pub fn get(tree: &Value, path: &str) -> Option<Value> {
    DotPath::default().get(tree, path)
}

/// Read the value at `path`, or `default` when undefined
pub fn get_or(tree: &Value, path: &str, default: Value) -> Option<Value> {
    DotPath::default().get_or(tree, path, default)
}

/// Whether `path` resolves to a value
pub fn has(tree: &Value, path: &str) -> bool {
    DotPath::default().has(tree, path)
}

/// Write `value` at `path` in place
pub fn set(tree: &mut Value, path: &str, value: Value) -> Result<()> {
    DotPath::default().set(tree, path, value)
}

/// Delete the value at `path` in place
pub fn delete(tree: &mut Value, path: &str) -> Result<()> {
    DotPath::default().delete(tree, path)
}

fn read(tree: &Value, path: &Path) -> Option<Value> {
    if path.is_empty() {
        return None;
    }

    let mut current = Cow::Borrowed(tree);
    for segment in path {
        let Segment::Key(key) = segment else {
            continue;
        };

        let next = match current {
            Cow::Borrowed(value) => step(value, key)?,
            Cow::Owned(value) => Cow::Owned(step(&value, key)?.into_owned()),
        };

        let stop = next.is_null();
        current = next;
        if stop {
            break;
        }
    }

    Some(current.into_owned())
}

/// One read step; projection produces an owned sequence
fn step<'a>(value: &'a Value, key: &str) -> Option<Cow<'a, Value>> {
    match value {
        Value::Array(items) if !is_numeric_string(key) => Some(Cow::Owned(project(items, key))),
        Value::Array(items) => as_index(key).and_then(|i| items.get(i)).map(Cow::Borrowed),
        Value::Object(map) => map.get(key).map(Cow::Borrowed),
        _ => None,
    }
}

fn write(
    mut current: &mut Value,
    segments: &[Segment],
    value: Value,
    trail: &mut Trail<'_>,
) -> std::result::Result<(), TraversalError> {
    let Some((last, parents)) = segments.split_last() else {
        return Ok(());
    };

    for (i, segment) in parents.iter().enumerate() {
        if segment.is_wildcard() {
            if let Value::Array(items) = current {
                let rest = &segments[i + 1..];
                tracing::trace!(
                    path = trail.path,
                    elements = items.len(),
                    "set fan-out"
                );
                for (index, item) in items.iter_mut().enumerate() {
                    trail.push(index.to_string());
                    write(item, rest, value.clone(), trail)?;
                    trail.pop();
                }
                return Ok(());
            }
        }

        current = child_or_insert(current, segment.as_str(), trail)?;
        trail.push(segment.as_str().to_string());
    }

    assign(current, last.as_str(), value, trail)
}

fn child_or_insert<'a>(
    value: &'a mut Value,
    key: &str,
    trail: &Trail<'_>,
) -> std::result::Result<&'a mut Value, TraversalError> {
    match value {
        Value::Object(map) => Ok(map.entry(key).or_insert_with(|| {
            tracing::trace!(path = trail.path, key, "creating intermediate mapping");
            Value::Object(Map::new())
        })),
        Value::Array(items) => {
            let index = as_index(key).ok_or_else(|| trail.invalid_index(key))?;
            if index >= items.len() {
                pad_to(items, index, key, trail)?;
                items.push(Value::Object(Map::new()));
            }
            Ok(&mut items[index])
        }
        other => Err(trail.not_a_container(other)),
    }
}

fn assign(
    target: &mut Value,
    key: &str,
    value: Value,
    trail: &Trail<'_>,
) -> std::result::Result<(), TraversalError> {
    match target {
        Value::Object(map) => {
            map.insert(key.to_string(), value);
            Ok(())
        }
        Value::Array(items) => {
            let index = as_index(key).ok_or_else(|| trail.invalid_index(key))?;
            if index >= items.len() {
                pad_to(items, index, key, trail)?;
                items.push(value);
            } else {
                items[index] = value;
            }
            Ok(())
        }
        other => Err(trail.not_a_container(other)),
    }
}

/// Pad `items` with `null` up to length `index`, within the trail's gap
fn pad_to(
    items: &mut Vec<Value>,
    index: usize,
    key: &str,
    trail: &Trail<'_>,
) -> std::result::Result<(), TraversalError> {
    let gap = index.saturating_sub(items.len());
    if gap > trail.max_gap {
        return Err(trail.index_out_of_range(key, items.len()));
    }
    items.resize(index, Value::Null);
    Ok(())
}

fn remove(
    mut current: &mut Value,
    segments: &[Segment],
    trail: &mut Trail<'_>,
) -> std::result::Result<(), TraversalError> {
    let len = segments.len();

    for (i, segment) in segments.iter().enumerate() {
        if segment.is_wildcard() {
            if is_sequence_of_mappings(current) {
                if let Value::Array(items) = &mut *current {
                    let rest = &segments[i + 1..];
                    tracing::trace!(
                        path = trail.path,
                        elements = items.len(),
                        "delete fan-out"
                    );
                    for (index, item) in items.iter_mut().enumerate() {
                        trail.push(index.to_string());
                        remove(item, rest, trail)?;
                        trail.pop();
                    }
                }
            }
            continue;
        }

        let key = segment.as_str();
        if i == len - 1 {
            remove_terminal(current, key);
            return Ok(());
        }

        current = match child_mut(current, key, trail)? {
            Some(child) => child,
            None => return Ok(()),
        };
        trail.push(key.to_string());
    }

    Ok(())
}

fn child_mut<'a>(
    value: &'a mut Value,
    key: &str,
    trail: &Trail<'_>,
) -> std::result::Result<Option<&'a mut Value>, TraversalError> {
    match value {
        Value::Object(map) => Ok(map.get_mut(key)),
        Value::Array(items) => Ok(as_index(key).and_then(move |i| items.get_mut(i))),
        other => Err(trail.not_a_container(other)),
    }
}

fn remove_terminal(target: &mut Value, key: &str) {
    match target {
        Value::Array(items) if is_numeric_string(key) => {
            if let Some(index) = as_index(key).filter(|&i| i < items.len()) {
                items.remove(index);
            }
        }
        Value::Object(map) => {
            map.shift_remove(key);
        }
        _ => {}
    }
}

/// Path being applied and the prefix walked so far, for diagnostics
struct Trail<'p> {
    path: &'p str,
    reached: Vec<String>,
    max_gap: usize,
}

impl<'p> Trail<'p> {
    fn new(path: &'p str, max_gap: usize) -> Self {
        Self {
            path,
            reached: Vec::new(),
            max_gap,
        }
    }

    fn push(&mut self, segment: String) {
        self.reached.push(segment);
    }

    fn pop(&mut self) {
        self.reached.pop();
    }

    fn reached(&self) -> String {
        self.reached
            .iter()
            .map(|segment| escape_segment(segment))
            .collect::<Vec<_>>()
            .join(".")
    }

    fn not_a_container(&self, found: &Value) -> TraversalError {
        TraversalError::NotAContainer {
            path: self.path.to_string(),
            reached: self.reached(),
            found_type: type_name(found).to_string(),
        }
    }

    fn invalid_index(&self, token: &str) -> TraversalError {
        TraversalError::InvalidIndex {
            path: self.path.to_string(),
            reached: self.reached(),
            token: token.to_string(),
        }
    }

    fn index_out_of_range(&self, index: &str, len: usize) -> TraversalError {
        TraversalError::IndexOutOfRange {
            path: self.path.to_string(),
            reached: self.reached(),
            index: index.to_string(),
            len,
            max_gap: self.max_gap,
        }
    }
}
