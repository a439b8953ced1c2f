//! Error type for `plantilla-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] plantilla_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A value could not be converted between its JSON and SQL forms.
  #[error("column {table}.{column}: {reason}")]
  Column {
    table:  &'static str,
    column: &'static str,
    reason: String,
  },

  /// A text-keyed record reached the store without a key.
  #[error("record for table {0} has no key")]
  MissingKey(&'static str),

  /// A row written a moment ago could not be read back.
  #[error("row {key} vanished from table {table}")]
  Vanished { table: &'static str, key: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
