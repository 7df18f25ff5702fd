//! Testing utilities for stores and the layers built on them
//!
//! - **RecordingStore**: wraps a store and logs every mutation, for asserting
//!   write counts and "nothing was written"
//! - **FailingStore**: wraps a store and fails mutations after a budget, for
//!   exercising partial failure of non-transactional hosts
//!
//! # Example
//!
//! ```
//! use nestkv_core::FlatStore;
//! use nestkv_storage::testing::{FailingStore, RecordingStore};
//! use nestkv_storage::MemoryStore;
//!
//! let store = RecordingStore::new(MemoryStore::new());
//! store.set_item("k", "v").unwrap();
//! assert_eq!(store.mutations().len(), 1);
//!
//! let flaky = FailingStore::new(MemoryStore::new(), 1);
//! assert!(flaky.set_item("a", "1").is_ok());
//! assert!(flaky.set_item("b", "2").is_err());
//! ```

mod failing;
mod recording;

pub use failing::FailingStore;
pub use recording::{RecordedOp, RecordingStore};
