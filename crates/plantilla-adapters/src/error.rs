//! Error type for `plantilla-adapters`.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{table} {key} not found")]
  NotFound { table: &'static str, key: String },

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("invalid credentials")]
  Unauthorized,

  /// A multi-step write stopped partway; earlier steps stay applied.
  #[error("{step} failed: {source}")]
  Cascade {
    step:   &'static str,
    #[source]
    source: Box<Error>,
  },

  /// The mirror holds a value of the wrong shape.
  #[error("unexpected mirror data: {0}")]
  Corrupt(String),

  #[error("password hashing error: {0}")]
  Password(String),

  #[error("core error: {0}")]
  Core(#[from] plantilla_core::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("store error: {0}")]
  Store(#[source] BoxError),

  #[error("mirror error: {0}")]
  Mirror(#[source] BoxError),
}

impl Error {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }

  pub fn mirror(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Mirror(Box::new(e))
  }

  pub(crate) fn not_found<R: plantilla_core::Resource>(
    key: &plantilla_core::Key,
  ) -> Self {
    Self::NotFound {
      table: R::TABLE.name,
      key:   key.to_string(),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
