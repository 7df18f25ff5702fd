//! Read requests
//!
//! A read is either a single key or a whole group. The string form keeps
//! the wildcard convention (`"a:b:*"` reads group `a:b`); internally the two
//! are distinct variants.

use nestkv_core::key;
use nestkv_core::Value;

/// A parsed read request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request<'a> {
    /// Read the value of one logical key
    Get(&'a str),
    /// Read the values of every member of a group; `""` is the namespace root
    GetGroup(&'a str),
}

impl<'a> Request<'a> {
    /// Parse a key, treating a trailing wildcard as a group request
    ///
    /// ```
    /// use nestkv_primitives::Request;
    ///
    /// assert_eq!(Request::parse("a:b"), Request::Get("a:b"));
    /// assert_eq!(Request::parse("a:b:*"), Request::GetGroup("a:b"));
    /// assert_eq!(Request::parse("*"), Request::GetGroup(""));
    /// ```
    pub fn parse(key: &'a str) -> Self {
        match key::group_path(key) {
            Some(path) => Request::GetGroup(path),
            None => Request::Get(key),
        }
    }

    /// True for group requests
    pub fn is_group(&self) -> bool {
        matches!(self, Request::GetGroup(_))
    }
}

/// Result of a read request
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    /// The key holds this value
    Value(Value),
    /// Values of the group's members, in index order
    Group(Vec<Value>),
    /// The key holds no value
    Absent,
}

impl Fetched {
    /// True if nothing was found
    pub fn is_absent(&self) -> bool {
        matches!(self, Fetched::Absent)
    }

    /// Collapse into a single value; a group becomes an array
    pub fn into_value(self) -> Option<Value> {
        match self {
            Fetched::Value(value) => Some(value),
            Fetched::Group(values) => Some(Value::Array(values)),
            Fetched::Absent => None,
        }
    }

    /// Collapse into a single value, using `fallback` when absent
    pub fn or(self, fallback: Value) -> Value {
        self.into_value().unwrap_or(fallback)
    }
}
