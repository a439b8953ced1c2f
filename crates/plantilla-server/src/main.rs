//! Plantilla server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) plus
//! `PLANTILLA_*` environment variables, opens the SQLite store, connects the
//! mirror, and serves the JSON API over HTTP.
//!
//! # Token digest generation
//!
//! To generate `api_token_sha256` for config.toml:
//!
//! ```
//! cargo run -p plantilla-server --bin server -- --hash-token
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use plantilla_adapters::Adapters;
use plantilla_core::mirror::Mirror;
use plantilla_mirror::{MemoryMirror, RtdbConfig, RtdbMirror};
use plantilla_server::{ServerConfig, auth::hash_token};
use plantilla_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Plantilla HR and procurement server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the SHA-256 digest of a token entered on stdin and exit.
  #[arg(long)]
  hash_token: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  if cli.hash_token {
    let token = read_stdin_line("Token: ")?;
    println!("{}", hash_token(&token));
    return Ok(());
  }

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("PLANTILLA"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;
  server_cfg.validate()?;

  let database_path = expand_tilde(&server_cfg.database_path);
  let store = SqliteStore::open(&database_path)
    .await
    .with_context(|| format!("failed to open store at {database_path:?}"))?;

  match &server_cfg.mirror_url {
    Some(url) => {
      let mirror = RtdbMirror::new(RtdbConfig {
        base_url: url.clone(),
        secret:   server_cfg.mirror_secret.clone(),
      })
      .context("failed to build mirror client")?;
      tracing::info!(%url, "mirroring to hosted tree");
      serve(store, mirror, &server_cfg).await
    }
    None => {
      tracing::warn!("no mirror_url configured; mirroring to process memory");
      serve(store, MemoryMirror::new(), &server_cfg).await
    }
  }
}

async fn serve<M>(
  store: SqliteStore,
  mirror: M,
  server_cfg: &ServerConfig,
) -> anyhow::Result<()>
where
  M: Mirror + 'static,
{
  let adapters = Arc::new(Adapters::new(store, mirror));
  let app = plantilla_server::router(adapters, Arc::new(server_cfg.auth()));
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

fn read_stdin_line(prompt: &str) -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  print!("{prompt}");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
