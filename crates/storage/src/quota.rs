//! Capacity accounting shared by the bundled stores
//!
//! Usage is the sum of key and value byte lengths over all records, the
//! same measure browser-style storage quotas use.

use std::collections::{BTreeMap, HashMap};

use nestkv_core::{BatchOp, StoreError, StoreResult, WriteBatch};

/// Bytes one record occupies
pub(crate) fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

/// Total bytes held by `data`
pub(crate) fn usage_of(data: &BTreeMap<String, String>) -> usize {
    data.iter().map(|(k, v)| entry_size(k, v)).sum()
}

/// Bytes held after replacing the value at `key` with `value`
pub(crate) fn usage_after_set(
    data: &BTreeMap<String, String>,
    used: usize,
    key: &str,
    value: &str,
) -> usize {
    let released = data.get(key).map(|old| entry_size(key, old)).unwrap_or(0);
    used - released + entry_size(key, value)
}

/// Bytes held after applying every operation of `batch` in order
pub(crate) fn usage_after_batch(
    data: &BTreeMap<String, String>,
    used: usize,
    batch: &WriteBatch,
) -> usize {
    let mut pending: HashMap<&str, Option<&str>> = HashMap::new();
    let mut used = used;

    for op in batch.ops() {
        let key = op.key();
        let current = match pending.get(key) {
            Some(value) => *value,
            None => data.get(key).map(String::as_str),
        };
        if let Some(old) = current {
            used -= entry_size(key, old);
        }
        match op {
            BatchOp::Set { value, .. } => {
                used += entry_size(key, value);
                pending.insert(key, Some(value.as_str()));
            }
            BatchOp::Remove { .. } => {
                pending.insert(key, None);
            }
        }
    }
    used
}

/// Fail with `QuotaExceeded` if `needed` does not fit in `capacity`
pub(crate) fn check(needed: usize, capacity: Option<usize>) -> StoreResult<()> {
    match capacity {
        Some(capacity) if needed > capacity => {
            Err(StoreError::QuotaExceeded { needed, capacity })
        }
        _ => Ok(()),
    }
}

/// Apply `batch` to `data` without any checks
pub(crate) fn apply_to(data: &mut BTreeMap<String, String>, batch: &WriteBatch) {
    for op in batch.ops() {
        match op {
            BatchOp::Set { key, value } => {
                data.insert(key.clone(), value.clone());
            }
            BatchOp::Remove { key } => {
                data.remove(key);
            }
        }
    }
}
