//! Noughts - terminal tic-tac-toe
//!
//! Plays against a second human at the same keyboard or against the
//! computer, whose moves arrive after a short delay.

#![warn(missing_docs)]

mod cli;
mod display;
mod session;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command, PlayArgs};
use noughts::GameConfig;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG: &str = "noughts.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play(args) => run_play(args).await,
        Command::Init { path, force } => run_init(path, force),
    }
}

/// Sends tracing output to a file so it never interleaves with the board.
fn init_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,noughts=debug")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Loads the config file named on the command line, or the default one if present.
fn load_config(explicit: Option<&Path>) -> Result<GameConfig> {
    match explicit {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None if Path::new(DEFAULT_CONFIG).exists() => GameConfig::from_file(DEFAULT_CONFIG)
            .with_context(|| format!("Failed to load config {}", DEFAULT_CONFIG)),
        None => Ok(GameConfig::default()),
    }
}

/// Run an interactive game in this terminal
#[instrument(skip(args), fields(log_file = %args.log_file.display()))]
async fn run_play(args: PlayArgs) -> Result<()> {
    init_logging(&args.log_file)?;

    let config = args.apply(load_config(args.config.as_deref())?);
    info!(
        opponent = %config.setup.opponent_kind,
        delay_ms = config.engine.agent_delay_ms,
        "Starting noughts"
    );

    session::run(config).await
}

/// Write a default config file
fn run_init(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let text = GameConfig::default()
        .to_toml()
        .context("Failed to render default config")?;
    std::fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
