//! Size limits for keys and values
//!
//! Limits are bound to a namespace handle when it is opened. Key violations
//! surface as `Error::InvalidKey`, value violations as
//! `Error::SerializationError`.

/// Default maximum logical key length in bytes
pub const DEFAULT_MAX_KEY_BYTES: usize = 1024;

/// Default maximum nesting depth of a stored value
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 100;

/// Deepest nesting stored text can be parsed back at
///
/// `serde_json` refuses input nested 128 levels or more, so no handle may
/// store anything deeper than this regardless of its configured limit.
pub const MAX_DECODABLE_DEPTH: usize = 127;

/// Size limits for keys and values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum logical key length in bytes (default: 1024)
    pub max_key_bytes: usize,

    /// Maximum nesting depth of arrays and objects (default: 100)
    ///
    /// A scalar has depth 0; `[1]` and `[]` have depth 1. Values above
    /// [`MAX_DECODABLE_DEPTH`] are rejected whatever this is set to.
    pub max_nesting_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_key_bytes: DEFAULT_MAX_KEY_BYTES,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl Limits {
    /// Nesting depth actually enforced: the configured limit, capped at
    /// [`MAX_DECODABLE_DEPTH`]
    pub fn nesting_depth(&self) -> usize {
        self.max_nesting_depth.min(MAX_DECODABLE_DEPTH)
    }

    /// Create limits with small values for testing
    ///
    /// Useful for unit tests that exercise limit enforcement without
    /// building huge keys or deeply nested values.
    pub fn with_small_limits() -> Self {
        Limits {
            max_key_bytes: 32,
            max_nesting_depth: 4,
        }
    }
}
