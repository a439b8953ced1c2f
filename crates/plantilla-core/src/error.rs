//! Error types for `plantilla-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("key {key:?} does not fit the key column of table {table}")]
  KeyKind { table: &'static str, key: String },

  #[error("table {table} has no column {column:?}")]
  UnknownColumn { table: &'static str, column: String },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
