//! Engine layer for NestKV
//!
//! Ties the pieces together for applications:
//! - config: `nestkv.toml` loading and defaults
//! - backend: the bundled flat store the config selects
//! - database: a data directory opened under its config
//!
//! ```no_run
//! use nestkv_engine::Database;
//!
//! # fn main() -> nestkv_core::Result<()> {
//! let db = Database::open("./data")?;
//! let settings = db.namespace("settings")?;
//! settings.set("ui:theme", "dark")?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod config;
pub mod database;

pub use backend::Backend;
pub use config::{BackendKind, NestConfig, CONFIG_FILE_NAME};
pub use database::Database;
