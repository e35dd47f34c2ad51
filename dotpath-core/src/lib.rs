//! dotpath core - Dot-notation addressing over JSON trees
//!
//! This crate reads, writes, tests and deletes values inside nested
//! `serde_json::Value` trees using paths such as `users.0.name`:
//!
//! - Path tokenizer with `\.` escapes and disallowed-key rejection
//! - get / set / has / delete with wildcard (`*`) handling
//! - Array projection of a key across sequence elements
//! - Flattening to a single-level map of dot paths
//! - Leaf path enumeration
//!
//! ```
//! use dotpath_core::{get, set};
//! use serde_json::json;
//!
//! let mut tree = json!({"items": [{"n": 1}, {"n": 2}]});
//! set(&mut tree, "items.*.n", json!(0)).unwrap();
//! assert_eq!(get(&tree, "items.n"), Some(json!([0, 0])));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod accessor;
pub mod error;
pub mod flatten;
pub mod limits;
pub mod path;
pub mod paths;
pub mod predicates;
pub mod projection;

// Re-export commonly used types
pub use accessor::{delete, get, get_or, has, set, DotPath};
pub use error::{ConfigError, DotPathError, PathError, Result, TraversalError};
pub use flatten::{flatten, unflatten};
pub use limits::PathLimits;
pub use path::{escape_segment, parse, tokenize, tokenize_with, Path, Segment};
pub use paths::enumerate_paths;
pub use predicates::{is_numeric_string, is_sequence_of_mappings};
pub use projection::project;
