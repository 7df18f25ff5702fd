//! The flat store contract
//!
//! [`FlatStore`] is the host capability NestKV is layered on: a string-keyed,
//! string-valued store with synchronous get/set/remove/clear and key
//! enumeration. Swapping implementations never touches the namespace layer.

use crate::batch::{BatchOp, WriteBatch};
use crate::error::StoreResult;
use std::sync::Arc;

/// Flat string-keyed persistent store
///
/// Thread safety: all methods take `&self`; implementations use interior
/// mutability so one store can be shared by many namespace handles through
/// an `Arc`.
pub trait FlatStore: Send + Sync {
    /// Get the value stored at `key`
    ///
    /// Returns `None` if the key is absent.
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` at `key`, replacing any prior value
    ///
    /// # Errors
    ///
    /// Returns `StoreError::QuotaExceeded` if the store is capacity-bounded
    /// and the write does not fit. The store is unchanged in that case.
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete `key`; a no-op if absent
    fn remove_item(&self, key: &str) -> StoreResult<()>;

    /// Delete every key, regardless of namespace
    fn clear(&self) -> StoreResult<()>;

    /// All keys currently present, in no particular order
    fn keys(&self) -> StoreResult<Vec<String>>;

    /// Membership check over the store's keys
    fn contains_key(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get_item(key)?.is_some())
    }

    /// Number of keys currently present
    fn len(&self) -> StoreResult<usize> {
        Ok(self.keys()?.len())
    }

    /// True if the store holds no keys
    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Apply a batch of mutations in order
    ///
    /// The default runs each operation through `set_item`/`remove_item`
    /// and stops at the first error, leaving earlier operations applied.
    /// Stores that can do better override this to apply all-or-nothing.
    fn apply(&self, batch: &WriteBatch) -> StoreResult<()> {
        for op in batch.ops() {
            match op {
                BatchOp::Set { key, value } => self.set_item(key, value)?,
                BatchOp::Remove { key } => self.remove_item(key)?,
            }
        }
        Ok(())
    }
}

impl<T: FlatStore + ?Sized> FlatStore for Arc<T> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }

    fn clear(&self) -> StoreResult<()> {
        (**self).clear()
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        (**self).keys()
    }

    fn contains_key(&self, key: &str) -> StoreResult<bool> {
        (**self).contains_key(key)
    }

    fn len(&self) -> StoreResult<usize> {
        (**self).len()
    }

    fn apply(&self, batch: &WriteBatch) -> StoreResult<()> {
        (**self).apply(batch)
    }
}
