//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  BadRequest(String),

  #[error("invalid credentials")]
  Unauthorized,

  #[error("{0}")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<plantilla_adapters::Error> for ApiError {
  fn from(e: plantilla_adapters::Error) -> Self {
    use plantilla_adapters::Error;

    let message = e.to_string();
    match e {
      Error::NotFound { .. } => Self::NotFound(message),
      Error::BadRequest(m) => Self::BadRequest(m),
      Error::Unauthorized => Self::Unauthorized,
      // Malformed ids and patch values that do not fit the record type.
      Error::Core(plantilla_core::Error::KeyKind { .. }) | Error::Json(_) => {
        Self::BadRequest(message)
      }
      other => {
        tracing::error!(error = %other, "request failed");
        Self::Internal(Box::new(other))
      }
    }
  }
}

impl From<plantilla_core::Error> for ApiError {
  fn from(e: plantilla_core::Error) -> Self {
    plantilla_adapters::Error::Core(e).into()
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
