//! fueleu-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the compliance API over HTTP.
//! `--seed` wipes the store and loads the demo fixtures before serving.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use fueleu_core::engine::ComplianceEngine;
use fueleu_server::ServerConfig;
use fueleu_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "FuelEU compliance server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Wipe the store and load the demo data set before serving.
  #[arg(long)]
  seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("FUELEU"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  if cli.seed {
    fueleu_server::seed::seed(&store)
      .await
      .context("failed to seed demo data")?;
  }

  let engine = ComplianceEngine::new(store);
  let app = fueleu_server::app(engine);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Replace a leading `~` with `$HOME`, if set.
fn expand_tilde(path: &Path) -> PathBuf {
  let Ok(stripped) = path.strip_prefix("~") else {
    return path.to_path_buf();
  };
  match std::env::var_os("HOME") {
    Some(home) => PathBuf::from(home).join(stripped),
    None => path.to_path_buf(),
  }
}
