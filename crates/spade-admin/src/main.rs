//! `spade-admin`: editor tooling for the Spade catalog.
//!
//! # Usage
//!
//! ```
//! spade-admin artist add "Burna Boy"
//! spade-admin song add --artist burna-boy --title "Last Last" --lyrics-file last-last.txt
//! spade-admin song annotate last-last --snippet ogogoro --explanation "Local gin"
//! spade-admin song bulk mark-published 4 5 6
//! spade-admin song update last-last --clear-bpm --genre afrobeats
//! spade-admin annotation delete 12
//! spade-admin --store ~/spade.db song list --status draft
//! ```

mod cli;
mod commands;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use spade_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Cli::parse();

  let store_path = expand_tilde(&args.store);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("opening store at {}", store_path.display()))?;

  let output = commands::run(&store, args.command).await?;
  print!("{output}");
  Ok(())
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
