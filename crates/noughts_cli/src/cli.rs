//! Command-line interface for noughts.

use clap::{Args, Parser, Subcommand};
use noughts::{GameConfig, OpponentKind};
use std::path::PathBuf;

/// Noughts - tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Play tic-tac-toe against a friend or the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in this terminal
    Play(PlayArgs),

    /// Write a default configuration file
    Init {
        /// Where to write the file
        #[arg(default_value = "noughts.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Options for `play`. Flags override values from the config file.
#[derive(Args, Debug, Default)]
pub struct PlayArgs {
    /// Path to a TOML config file (defaults to ./noughts.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Who plays O: "human" or "automated"
    #[arg(short, long)]
    pub opponent: Option<OpponentKind>,

    /// Name of the first player (X)
    #[arg(long)]
    pub player_one: Option<String>,

    /// Name of the second player (O)
    #[arg(long)]
    pub player_two: Option<String>,

    /// Delay before the computer's move, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Seed for the computer's choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// File that receives log output
    #[arg(long, default_value = "noughts.log")]
    pub log_file: PathBuf,
}

impl PlayArgs {
    /// Applies command-line overrides on top of a loaded config.
    pub fn apply(&self, mut config: GameConfig) -> GameConfig {
        if let Some(kind) = self.opponent {
            config.setup.opponent_kind = kind;
        }
        if let Some(name) = &self.player_one {
            config.setup.player_one_name = name.clone();
        }
        if let Some(name) = &self.player_two {
            config.setup.player_two_name = Some(name.clone());
        }
        if let Some(delay) = self.delay_ms {
            config.engine.agent_delay_ms = delay;
        }
        if self.seed.is_some() {
            config.engine.agent_seed = self.seed;
        }
        config
    }
}
