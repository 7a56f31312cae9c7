//! Command-line interface for strictly_tictactoe.

use clap::{Parser, Subcommand};
use strictly_tictactoe::Difficulty;

/// Strictly Games tic-tac-toe - play X against the computer
#[derive(Parser, Debug)]
#[command(name = "strictly_tictactoe")]
#[command(about = "Tic-tac-toe against a computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the game configuration file
    #[arg(short, long, global = true, default_value = "strictly_tictactoe.toml")]
    pub config: std::path::PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Start straight away at this difficulty (easy, normal, hard)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Seed the computer's random choices
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play a batch of games headlessly and print the tally
    Simulate {
        /// Number of games
        #[arg(short, long, default_value = "1000")]
        games: u32,

        /// Computer difficulty (easy, normal, hard)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
}
