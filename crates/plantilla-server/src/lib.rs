//! HTTP server glue for Plantilla.
//!
//! Wraps the JSON API from `plantilla-api` with the bearer-token check and
//! request tracing, and defines the runtime configuration.

pub mod auth;
pub mod error;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, middleware};
use plantilla_adapters::Adapters;
use plantilla_core::{mirror::Mirror, store::RecordStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::{AuthConfig, require_bearer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `PLANTILLA_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:             String,
  #[serde(default = "default_port")]
  pub port:             u16,
  pub database_path:    PathBuf,
  /// Base URL of the hosted key-path tree; without it an in-memory mirror
  /// is used.
  pub mirror_url:       Option<String>,
  pub mirror_secret:    Option<String>,
  /// Hex SHA-256 of the API bearer token (see `server --hash-token`).
  pub api_token_sha256: String,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

impl ServerConfig {
  pub fn validate(&self) -> Result<(), Error> {
    let digest = &self.api_token_sha256;
    if digest.len() != 64 || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
      return Err(Error::Config(
        "api_token_sha256 must be 64 hex characters".to_string(),
      ));
    }
    if let Some(url) = &self.mirror_url
      && !(url.starts_with("https://") || url.starts_with("http://"))
    {
      return Err(Error::Config(format!("mirror_url {url:?} is not an http(s) URL")));
    }
    Ok(())
  }

  pub fn auth(&self) -> AuthConfig {
    AuthConfig {
      token_sha256: self.api_token_sha256.to_ascii_lowercase(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: `/api` behind the bearer check, with
/// request tracing on everything.
pub fn router<S, M>(adapters: Arc<Adapters<S, M>>, auth: Arc<AuthConfig>) -> Router
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
{
  let api = plantilla_api::api_router(adapters)
    .layer(middleware::from_fn_with_state(auth, require_bearer));

  Router::new()
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
