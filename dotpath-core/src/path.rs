//! Dot-notation path tokenizer
//!
//! A path such as `users.0.name` is split on unescaped dots into segments.
//! A dot preceded by a backslash (`a\.b`) belongs to the key. The single
//! segment `*` is the wildcard token.
//!
//! Paths that name a disallowed key anywhere are rejected as a whole.

use crate::error::PathError;
use crate::limits::PathLimits;
use std::fmt;

/// Keys that may never appear in a path
pub const DISALLOWED_KEYS: [&str; 3] = ["__proto__", "prototype", "constructor"];

/// The wildcard token
pub const WILDCARD: &str = "*";

/// One unit of a parsed path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A literal mapping key or sequence index
    Key(String),
    /// `*`: every element of the sequence at this position
    Wildcard,
}

impl Segment {
    /// Build a segment from an already-unescaped token
    pub fn from_token(token: String) -> Self {
        if token == WILDCARD {
            Segment::Wildcard
        } else {
            Segment::Key(token)
        }
    }

    /// The literal key for this segment (`*` for the wildcard)
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Key(key) => key,
            Segment::Wildcard => WILDCARD,
        }
    }

    /// Whether this segment is the wildcard token
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Wildcard)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&escape_segment(self.as_str()))
    }
}

/// An ordered sequence of segments
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<Segment>);

impl Path {
    /// Build a path from segments
    pub fn new(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    /// Segments in order
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the path has no segments
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any segment is the wildcard
    pub fn has_wildcard(&self) -> bool {
        self.0.iter().any(Segment::is_wildcard)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_segments(&self.0))
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Path> for Vec<Segment> {
    fn from(path: Path) -> Self {
        path.0
    }
}

/// Tokenize a path with no length or depth cap
///
/// Never fails: rejected paths yield an empty [`Path`].
pub fn tokenize(path: &str) -> Path {
    tokenize_with(path, &PathLimits::permissive())
}

/// Tokenize a path, failing closed to an empty [`Path`]
pub fn tokenize_with(path: &str, limits: &PathLimits) -> Path {
    match parse(path, limits) {
        Ok(parsed) => parsed,
        Err(PathError::Empty) => Path::default(),
        Err(err) => {
            tracing::debug!(error = %err, "rejected path");
            Path::default()
        }
    }
}

/// Parse a path, reporting why it was rejected
pub fn parse(path: &str, limits: &PathLimits) -> Result<Path, PathError> {
    if path.len() > limits.max_path_length {
        return Err(PathError::PathTooLong {
            path: path.to_string(),
            length: path.len(),
            max_length: limits.max_path_length,
        });
    }

    let tokens: Vec<String> = split_unescaped(path)
        .into_iter()
        .map(|raw| unescape_segment(&raw))
        .filter(|token| !token.is_empty())
        .collect();

    if let Some(key) = tokens
        .iter()
        .find(|token| DISALLOWED_KEYS.contains(&token.as_str()))
    {
        return Err(PathError::DisallowedKey {
            path: path.to_string(),
            key: key.clone(),
        });
    }

    if tokens.is_empty() {
        return Err(PathError::Empty);
    }

    if tokens.len() > limits.max_depth {
        return Err(PathError::DepthLimitExceeded {
            path: path.to_string(),
            depth: tokens.len(),
            max_depth: limits.max_depth,
        });
    }

    Ok(Path(tokens.into_iter().map(Segment::from_token).collect()))
}

/// Escape a key for embedding in a path (`.` → `\.`)
pub fn escape_segment(key: &str) -> String {
    key.replace('.', "\\.")
}

/// Undo [`escape_segment`] (`\.` → `.`)
pub fn unescape_segment(segment: &str) -> String {
    segment.replace("\\.", ".")
}

/// Join segments back into a path string, escaping embedded dots
pub fn join_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| escape_segment(segment.as_str()))
        .collect::<Vec<_>>()
        .join(".")
}

/// Split on dots that are not immediately preceded by a backslash
fn split_unescaped(path: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut prev = None;

    for ch in path.chars() {
        if ch == '.' && prev != Some('\\') {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
        prev = Some(ch);
    }
    parts.push(current);

    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(path: &str) -> Vec<String> {
        tokenize(path)
            .segments()
            .iter()
            .map(|s| s.as_str().to_string())
            .collect()
    }

    #[test]
    fn splits_on_dots() {
        assert_eq!(keys("a.b.c"), vec!["a", "b", "c"]);
        assert_eq!(keys("obj.ary.0.value"), vec!["obj", "ary", "0", "value"]);
    }

    #[test]
    fn escaped_dot_stays_in_key() {
        assert_eq!(keys("a.b\\.c"), vec!["a", "b.c"]);
        assert_eq!(keys("obj.ary.0.va\\.lue"), vec!["obj", "ary", "0", "va.lue"]);
    }

    #[test]
    fn wildcard_is_its_own_segment() {
        let path = tokenize("a.*.b");
        assert_eq!(
            path.segments(),
            &[
                Segment::Key("a".into()),
                Segment::Wildcard,
                Segment::Key("b".into())
            ]
        );
        assert!(path.has_wildcard());
        assert_eq!(keys("a.x*.b"), vec!["a", "x*", "b"]);
        assert!(!tokenize("a.x*.b").has_wildcard());
    }

    #[test]
    fn disallowed_key_rejects_whole_path() {
        assert!(tokenize("a.__proto__.b").is_empty());
        assert!(tokenize("constructor").is_empty());
        assert!(tokenize("x.prototype").is_empty());
        assert!(matches!(
            parse("a.__proto__.b", &PathLimits::default()),
            Err(PathError::DisallowedKey { ref key, .. }) if key == "__proto__"
        ));
    }

    #[test]
    fn disallowed_key_detected_after_unescape() {
        // `proto\.type` unescapes to `proto.type`, which is allowed
        assert_eq!(keys("a.proto\\.type"), vec!["a", "proto.type"]);
        assert!(!tokenize("a.__proto__x").is_empty());
    }

    #[test]
    fn empty_and_degenerate_paths() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("...").is_empty());
        assert_eq!(parse("", &PathLimits::default()), Err(PathError::Empty));
        assert_eq!(keys(".a..b."), vec!["a", "b"]);
    }

    #[test]
    fn enforces_limits() {
        let limits = PathLimits {
            max_path_length: 8,
            max_depth: 2,
            ..PathLimits::default()
        };
        assert!(matches!(
            parse("abcdefghij", &limits),
            Err(PathError::PathTooLong { length: 10, .. })
        ));
        assert!(matches!(
            parse("a.b.c", &limits),
            Err(PathError::DepthLimitExceeded { depth: 3, .. })
        ));
        assert!(tokenize_with("a.b.c", &limits).is_empty());
        assert_eq!(tokenize_with("a.b", &limits).len(), 2);
    }

    #[test]
    fn unbound_tokenize_has_no_depth_cap() {
        let deep: Vec<String> = (0..300).map(|i| format!("k{i}")).collect();
        let path = deep.join(".");
        assert_eq!(tokenize(&path).len(), 300);
        assert!(tokenize(&"x".repeat(70_000)).len() == 1);
    }

    #[test]
    fn display_escapes_dots() {
        let path = tokenize("a.b\\.c.*");
        assert_eq!(path.to_string(), "a.b\\.c.*");
        assert_eq!(tokenize(&path.to_string()), path);
    }

    #[test]
    fn escape_and_unescape_roundtrip() {
        let original = "version.1.2";
        let escaped = escape_segment(original);
        assert_eq!(escaped, "version\\.1\\.2");
        assert_eq!(unescape_segment(&escaped), original);
    }
}
