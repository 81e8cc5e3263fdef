//! `roster` — command-line client for the Roster activity signup API.
//!
//! # Usage
//!
//! ```text
//! roster list
//! roster signup "Soccer Team" newstudent@mergington.edu
//! roster unregister "Soccer Team" newstudent@mergington.edu
//! roster --url http://school.example:8000 list
//! ```

mod client;

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::ApiClient;
use roster_core::activity::Listing;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:8000";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "roster", version, about = "Sign students up for school activities")]
struct Args {
  /// Path to a TOML config file (`url = "..."`).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the roster server (default: http://localhost:8000).
  #[arg(long, env = "ROSTER_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List every activity with its schedule and participants.
  List,
  /// Add a student to an activity.
  Signup { activity: String, email: String },
  /// Remove a student from an activity.
  Unregister { activity: String, email: String },
}

// ─── Config file ──────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let base_url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
    .unwrap_or_else(|| DEFAULT_URL.to_string());

  let client = ApiClient::new(&base_url)?;

  match args.command {
    Command::List => {
      let listing = client.list_activities().await?;
      print!("{}", render_listing(&listing));
    }
    Command::Signup { activity, email } => {
      println!("{}", client.signup(&activity, &email).await?);
    }
    Command::Unregister { activity, email } => {
      println!("{}", client.unregister(&activity, &email).await?);
    }
  }

  Ok(())
}

// ─── Rendering ────────────────────────────────────────────────────────────────

fn render_listing(listing: &Listing) -> String {
  let mut out = String::new();
  for (name, activity) in listing.iter() {
    let _ = writeln!(
      out,
      "{name} ({}/{})",
      activity.enrolled(),
      activity.max_participants
    );
    let _ = writeln!(out, "  {}", activity.schedule);
    let _ = writeln!(out, "  {}", activity.description);
    if activity.participants.is_empty() {
      let _ = writeln!(out, "  (no participants)");
    }
    for email in &activity.participants {
      let _ = writeln!(out, "  - {email}");
    }
  }
  out
}
