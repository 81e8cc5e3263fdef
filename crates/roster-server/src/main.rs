//! roster-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), layers `ROSTER_*`
//! environment variables on top, seeds the in-memory directory and serves the
//! API plus the static front end over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use roster_server::ServerConfig;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Mergington High School activity signup server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the resolved configuration and exit.
  #[arg(long)]
  check_config: bool,
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

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("ROSTER").try_parsing(true))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  if cli.check_config {
    println!("{server_cfg:#?}");
    return Ok(());
  }

  if !server_cfg.has_static_index() {
    tracing::warn!(
      static_dir = %server_cfg.static_dir.display(),
      "no index.html under static_dir; `/` will redirect to a 404",
    );
  }

  let directory = roster_server::load_directory(server_cfg.seed_path.as_deref())?;
  tracing::info!(activities = directory.len(), "directory seeded");

  let app     = roster_server::router(Arc::new(directory), &server_cfg);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
