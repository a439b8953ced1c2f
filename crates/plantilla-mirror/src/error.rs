//! Error type for `plantilla-mirror`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid mirror path {0:?}")]
  InvalidPath(String),

  #[error("invalid mirror url {0:?}")]
  InvalidUrl(String),

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("{method} {path} returned {status}")]
  Status {
    method: String,
    path:   String,
    status: reqwest::StatusCode,
  },

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// The in-memory mirror was switched offline.
  #[error("mirror unreachable")]
  Offline,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
