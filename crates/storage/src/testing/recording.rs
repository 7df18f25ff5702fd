//! Store wrapper that logs every mutation

use parking_lot::Mutex;

use nestkv_core::{BatchOp, FlatStore, StoreResult, WriteBatch};

/// Mutation observed by a [`RecordingStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedOp {
    /// `set_item`, or a set inside an applied batch
    Set {
        /// Physical key
        key: String,
        /// Stored text
        value: String,
    },
    /// `remove_item`, or a remove inside an applied batch
    Remove {
        /// Physical key
        key: String,
    },
    /// `clear`
    Clear,
}

impl From<&BatchOp> for RecordedOp {
    fn from(op: &BatchOp) -> Self {
        match op {
            BatchOp::Set { key, value } => RecordedOp::Set {
                key: key.clone(),
                value: value.clone(),
            },
            BatchOp::Remove { key } => RecordedOp::Remove { key: key.clone() },
        }
    }
}

/// Wraps a store and records every successful mutation in order
///
/// Batches are forwarded to the inner store's `apply`, so the inner
/// store's atomicity is preserved; their operations are logged
/// individually once the batch succeeds.
#[derive(Debug)]
pub struct RecordingStore<S> {
    inner: S,
    log: Mutex<Vec<RecordedOp>>,
    batches: Mutex<usize>,
}

impl<S: FlatStore> RecordingStore<S> {
    /// Wrap `inner`
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            log: Mutex::new(Vec::new()),
            batches: Mutex::new(0),
        }
    }

    /// The wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Every mutation recorded so far
    pub fn mutations(&self) -> Vec<RecordedOp> {
        self.log.lock().clone()
    }

    /// Number of recorded sets targeting `key`
    pub fn sets_to(&self, key: &str) -> usize {
        self.log
            .lock()
            .iter()
            .filter(|op| matches!(op, RecordedOp::Set { key: k, .. } if k == key))
            .count()
    }

    /// Number of batches applied
    pub fn batches_applied(&self) -> usize {
        *self.batches.lock()
    }

    /// Forget everything recorded so far
    pub fn reset(&self) {
        self.log.lock().clear();
        *self.batches.lock() = 0;
    }
}

impl<S: FlatStore> FlatStore for RecordingStore<S> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.inner.set_item(key, value)?;
        self.log.lock().push(RecordedOp::Set {
            key: key.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.inner.remove_item(key)?;
        self.log.lock().push(RecordedOp::Remove {
            key: key.to_string(),
        });
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        self.inner.clear()?;
        self.log.lock().push(RecordedOp::Clear);
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        self.inner.keys()
    }

    fn contains_key(&self, key: &str) -> StoreResult<bool> {
        self.inner.contains_key(key)
    }

    fn len(&self) -> StoreResult<usize> {
        self.inner.len()
    }

    fn apply(&self, batch: &WriteBatch) -> StoreResult<()> {
        self.inner.apply(batch)?;
        self.log
            .lock()
            .extend(batch.ops().iter().map(RecordedOp::from));
        *self.batches.lock() += 1;
        Ok(())
    }
}
