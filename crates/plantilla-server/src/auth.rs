//! Bearer-token middleware.
//!
//! The server stores only the SHA-256 digest of the API token; a request is
//! accepted when the digest of its bearer token matches.

use std::sync::Arc;

use axum::{
  extract::{Request, State},
  http::{HeaderMap, header},
  middleware::Next,
  response::{IntoResponse, Response},
};
use sha2::{Digest, Sha256};

use crate::error::Error;

#[derive(Clone)]
pub struct AuthConfig {
  /// Lowercase hex SHA-256 of the accepted token.
  pub token_sha256: String,
}

/// Hex SHA-256 digest of `token`, the form kept in configuration.
pub fn hash_token(token: &str) -> String {
  hex::encode(Sha256::digest(token.as_bytes()))
}

/// Verify the `Authorization: Bearer` header.
pub fn verify_bearer(headers: &HeaderMap, config: &AuthConfig) -> Result<(), Error> {
  let token = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "))
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .ok_or(Error::Unauthorized)?;

  if hash_token(token).eq_ignore_ascii_case(&config.token_sha256) {
    Ok(())
  } else {
    Err(Error::Unauthorized)
  }
}

/// Middleware rejecting requests without a valid bearer token.
pub async fn require_bearer(
  State(config): State<Arc<AuthConfig>>,
  req: Request,
  next: Next,
) -> Response {
  match verify_bearer(req.headers(), &config) {
    Ok(()) => next.run(req).await,
    Err(e) => {
      tracing::debug!(path = %req.uri().path(), "rejected request without valid token");
      e.into_response()
    }
  }
}
