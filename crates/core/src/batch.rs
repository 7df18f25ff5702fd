//! Ordered write batches
//!
//! A namespace mutation touches several flat-store records: group indexes
//! and one value record. The handle collects them into a [`WriteBatch`] and
//! hands it to [`FlatStore::apply`](crate::traits::FlatStore::apply) in one
//! call. Operations keep their insertion order.

/// A single flat-store mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOp {
    /// Write `value` at `key`, replacing any prior value
    Set {
        /// Physical key
        key: String,
        /// Stored text
        value: String,
    },
    /// Delete `key` if present
    Remove {
        /// Physical key
        key: String,
    },
}

impl BatchOp {
    /// Physical key this operation touches
    pub fn key(&self) -> &str {
        match self {
            BatchOp::Set { key, .. } | BatchOp::Remove { key } => key,
        }
    }
}

/// Ordered list of flat-store mutations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<BatchOp>,
}

impl WriteBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a set operation
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.ops.push(BatchOp::Set {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Append a remove operation
    pub fn remove(&mut self, key: impl Into<String>) {
        self.ops.push(BatchOp::Remove { key: key.into() });
    }

    /// Operations in application order
    pub fn ops(&self) -> &[BatchOp] {
        &self.ops
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True if the batch holds no operations
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
