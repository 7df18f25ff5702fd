//! Store wrapper that injects write failures

use std::io;

use parking_lot::Mutex;

use nestkv_core::{FlatStore, StoreError, StoreResult};

/// Lets `budget` mutations through, then fails every following one
///
/// Batches run through the default sequential `apply`, so a failure can
/// land midway through a batch.
#[derive(Debug)]
pub struct FailingStore<S> {
    inner: S,
    remaining: Mutex<usize>,
}

impl<S: FlatStore> FailingStore<S> {
    /// Wrap `inner`, allowing `budget` successful mutations
    pub fn new(inner: S, budget: usize) -> Self {
        Self {
            inner,
            remaining: Mutex::new(budget),
        }
    }

    /// The wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Reset the budget of successful mutations
    pub fn set_budget(&self, budget: usize) {
        *self.remaining.lock() = budget;
    }

    fn spend(&self) -> StoreResult<()> {
        let mut remaining = self.remaining.lock();
        if *remaining == 0 {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::Other,
                "injected write failure",
            )));
        }
        *remaining -= 1;
        Ok(())
    }
}

impl<S: FlatStore> FlatStore for FailingStore<S> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.spend()?;
        self.inner.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.spend()?;
        self.inner.remove_item(key)
    }

    fn clear(&self) -> StoreResult<()> {
        self.spend()?;
        self.inner.clear()
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        self.inner.keys()
    }
}
