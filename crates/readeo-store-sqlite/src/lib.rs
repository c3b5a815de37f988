//! SQLite backend for the Readeo data-access layer.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod schema;
mod sql;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use schema::schema;
pub use store::SqliteStore;
