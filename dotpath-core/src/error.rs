//! Error types for dotpath

use thiserror::Error;

/// Reasons a dot-notation path string is rejected by the tokenizer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Path contains no segments after splitting and unescaping.
    #[error("Path is empty")]
    Empty,

    /// A segment names a key that must never be addressed.
    #[error("Path '{path}' contains disallowed key '{key}'")]
    DisallowedKey {
        /// The rejected path string
        path: String,
        /// The offending segment (after unescaping)
        key: String,
    },

    /// Path string exceeds the configured length limit.
    #[error("Path too long: {length} bytes (max: {max_length})")]
    PathTooLong {
        /// The rejected path string
        path: String,
        /// Actual length in bytes
        length: usize,
        /// Maximum length allowed
        max_length: usize,
    },

    /// Path has more segments than the configured depth limit.
    #[error("Path depth limit exceeded: '{path}' has depth {depth} (max: {max_depth})")]
    DepthLimitExceeded {
        /// The rejected path string
        path: String,
        /// Number of segments in the path
        depth: usize,
        /// Maximum number of segments allowed
        max_depth: usize,
    },
}

/// Errors raised by `set` and `delete` when a path cannot be walked
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalError {
    /// The path tries to descend through a value that is not a mapping or sequence.
    #[error(
        "Cannot traverse '{path}': value at '{reached}' is {found_type}, \
         expected an object or array"
    )]
    NotAContainer {
        /// Full path being applied
        path: String,
        /// Prefix of the path that resolved to the leaf
        reached: String,
        /// Type of the leaf found (e.g. "string", "null")
        found_type: String,
    },

    /// A sequence was addressed with a segment that is not a usable index.
    #[error("Cannot index array at '{reached}' with '{token}' while applying '{path}'")]
    InvalidIndex {
        /// Full path being applied
        path: String,
        /// Prefix of the path that resolved to the sequence
        reached: String,
        /// The segment that is not a canonical array index
        token: String,
    },

    /// A write would pad a sequence further past its end than allowed.
    #[error(
        "Index {index} at '{reached}' is too far past the end of an array of length {len} \
         (max gap: {max_gap}) while applying '{path}'"
    )]
    IndexOutOfRange {
        /// Full path being applied
        path: String,
        /// Prefix of the path that resolved to the sequence
        reached: String,
        /// The requested index, as written in the path
        index: String,
        /// Current length of the sequence
        len: usize,
        /// Maximum number of `null` slots a write may add
        max_gap: usize,
    },
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configured limits exceed the hard maximums.
    #[error("Configuration exceeds hard limits: {reason}")]
    ExceedsHardLimits {
        /// Which limit was exceeded and by how much
        reason: String,
    },
}

/// Top-level dotpath error
#[derive(Debug, Error)]
pub enum DotPathError {
    /// Path string was rejected.
    #[error(transparent)]
    Path(#[from] PathError),
    /// Path could not be walked against the tree.
    #[error(transparent)]
    Traversal(#[from] TraversalError),
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, DotPathError>;
