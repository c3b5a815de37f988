//! Error type for `readeo-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] readeo_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// The entity was not registered when the store was opened.
  #[error("unknown entity: {0}")]
  UnknownEntity(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
