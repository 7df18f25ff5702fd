//! Storage layer for NestKV
//!
//! This crate implements the `FlatStore` contract with:
//! - MemoryStore: BTreeMap-based in-process store with RwLock
//! - FileStore: the same map cached in memory and persisted as JSON
//! - testing: recording and failure-injecting wrappers
//!
//! Both bundled stores accept an optional byte capacity and apply write
//! batches all-or-nothing.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod file;
pub mod memory;
mod quota;
pub mod testing;

pub use file::FileStore;
pub use memory::MemoryStore;
