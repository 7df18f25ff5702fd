//! Core types and traits for NestKV
//!
//! This crate defines the foundational types used throughout the system:
//! - Key rules: delimiter, wildcard marker, validation, index path derivation
//! - Value: explicit stored-value model
//! - Codec: checked JSON text encoding of values
//! - FlatStore: the host store contract, with ordered WriteBatch application
//! - Error: error type hierarchy
//! - Limits: key and value size limits

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod codec;
pub mod error;
pub mod key;
pub mod limits;
pub mod traits;
pub mod value;

pub use batch::{BatchOp, WriteBatch};
pub use error::{Error, Result, StoreError, StoreResult};
pub use key::{KeyError, DELIMITER, WILDCARD};
pub use limits::Limits;
pub use traits::FlatStore;
pub use value::Value;
