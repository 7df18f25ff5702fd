//! Primitives layer for NestKV
//!
//! Provides the namespace handle and the index maintenance behind it:
//! - **NamespaceStore**: has/get/set/remove/clear/len/iteration for one
//!   namespace of a shared flat store
//! - **index**: group index records that make prefix reads O(group size)
//! - **Request**: tagged `Get` / `GetGroup` read requests
//!
//! ## Design Principle: Stateless Facades
//!
//! A handle holds only an `Arc` of the store plus its namespace id. This
//! means:
//!
//! - Multiple handles on the same store, or the same namespace, are safe
//! - No warm-up or cache invalidation concerns
//! - Each read reflects every write that completed before it

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod index;
pub mod namespace;
pub mod request;

pub use index::GroupIndex;
pub use namespace::{NamespaceStore, Values};
pub use request::{Fetched, Request};
