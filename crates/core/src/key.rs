//! Logical keys and their mapping onto the flat store
//!
//! A logical key is a string of segments joined by [`DELIMITER`]. Every
//! physical record a namespace owns is prefixed with the namespace id:
//!
//! | Record            | Physical key            |
//! |-------------------|-------------------------|
//! | value of `a:b:c`  | `ns:a:b:c`              |
//! | root group index  | `ns:*`                  |
//! | group index `a:b` | `ns:a:b:*`              |
//! | namespace marker  | `ns`                    |
//!
//! Index records and value records share one key space and are told apart
//! only by the trailing [`WILDCARD`], which is why logical keys may never
//! contain it.
//!
//! ## Validation rules
//!
//! - Keys must not be empty
//! - Keys must not contain the wildcard marker `*` anywhere
//! - Keys must not exceed `max_key_bytes` (default: 1024)

use crate::limits::Limits;
use thiserror::Error;

/// Segment delimiter for hierarchical keys
pub const DELIMITER: char = ':';

/// Wildcard marker: "all members of this group" on read, reserved on write
pub const WILDCARD: char = '*';

/// Validate a logical key using default limits
///
/// # Examples
///
/// ```
/// use nestkv_core::key::validate_key;
///
/// assert!(validate_key("config:theme").is_ok());
/// assert!(validate_key("").is_err());
/// assert!(validate_key("config:*").is_err());
/// assert!(validate_key("foo*bar").is_err());
/// ```
pub fn validate_key(key: &str) -> Result<(), KeyError> {
    validate_key_with_limits(key, &Limits::default())
}

/// Check the shape of a key without applying any size limit
///
/// Used where a key only has to be one that could name a value record,
/// such as removal: a key stored through a handle with looser limits must
/// still be removable.
pub fn validate_key_shape(key: &str) -> Result<(), KeyError> {
    if key.is_empty() {
        return Err(KeyError::Empty);
    }

    if key.ends_with(WILDCARD) {
        return Err(KeyError::EndsWithWildcard);
    }

    if key.contains(WILDCARD) {
        return Err(KeyError::ContainsWildcard);
    }

    Ok(())
}

/// Validate a logical key with custom limits
pub fn validate_key_with_limits(key: &str, limits: &Limits) -> Result<(), KeyError> {
    validate_key_shape(key)?;

    let len = key.len();
    if len > limits.max_key_bytes {
        return Err(KeyError::TooLong {
            actual: len,
            max: limits.max_key_bytes,
        });
    }

    Ok(())
}

/// Key validation errors
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum KeyError {
    /// Key is empty (length 0)
    #[error("invalid key format: keys may not be empty")]
    Empty,

    /// Key ends in the wildcard marker
    #[error("invalid key format: keys may not end in an asterisk")]
    EndsWithWildcard,

    /// Key contains the wildcard marker before its end
    #[error("invalid key format: keys may not contain an asterisk")]
    ContainsWildcard,

    /// Key exceeds maximum length
    #[error("invalid key format: {actual} bytes exceeds maximum {max}")]
    TooLong {
        /// Actual key length in bytes
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },
}

impl KeyError {
    /// Short machine-readable reason code
    pub fn reason_code(&self) -> &'static str {
        match self {
            KeyError::Empty => "empty_key",
            KeyError::EndsWithWildcard => "ends_with_wildcard",
            KeyError::ContainsWildcard => "contains_wildcard",
            KeyError::TooLong { .. } => "key_too_long",
        }
    }
}

/// If `key` is a group request (ends in `*`), return the group path
///
/// The wildcard is dropped, then one trailing delimiter. An empty path
/// addresses the namespace root.
///
/// ```
/// use nestkv_core::key::group_path;
///
/// assert_eq!(group_path("a:b:*"), Some("a:b"));
/// assert_eq!(group_path("*"), Some(""));
/// assert_eq!(group_path("a:b"), None);
/// ```
pub fn group_path(key: &str) -> Option<&str> {
    let path = key.strip_suffix(WILDCARD)?;
    Some(path.strip_suffix(DELIMITER).unwrap_or(path))
}

/// Physical key of the value record for `key` in `namespace`
pub fn physical_key(namespace: &str, key: &str) -> String {
    format!("{}{}{}", namespace, DELIMITER, key)
}

/// Physical base path of a group inside `namespace`
///
/// The empty group path is the namespace itself.
pub fn group_base(namespace: &str, path: &str) -> String {
    if path.is_empty() {
        namespace.to_string()
    } else {
        physical_key(namespace, path)
    }
}

/// Physical key of the index record for a base path
pub fn index_key(base: &str) -> String {
    format!("{}{}{}", base, DELIMITER, WILDCARD)
}

/// Index base paths affected by a mutation of `key`
///
/// For segments `[s1, .., sn]` this is the namespace root followed by
/// `ns:s1`, `ns:s1:s2`, .., `ns:s1:..:s(n-1)`. The full key is never an
/// index path. Each path appears once.
///
/// ```
/// use nestkv_core::key::ancestor_paths;
///
/// assert_eq!(
///     ancestor_paths("app", "a:b:c"),
///     vec!["app".to_string(), "app:a".to_string(), "app:a:b".to_string()]
/// );
/// ```
pub fn ancestor_paths(namespace: &str, key: &str) -> Vec<String> {
    let mut paths = vec![namespace.to_string()];
    let mut current = namespace.to_string();

    let mut segments: Vec<&str> = key.split(DELIMITER).collect();
    segments.pop();

    for segment in segments {
        current.push(DELIMITER);
        current.push_str(segment);
        if !paths.contains(&current) {
            paths.push(current.clone());
        }
    }
    paths
}
