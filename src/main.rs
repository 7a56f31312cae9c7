//! Strictly Games tic-tac-toe - unified CLI.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::path::Path;
use strictly_tictactoe::{Difficulty, GameConfig, run_tui, simulate};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { difficulty, seed } => run_play(&cli.config, difficulty, seed).await,
        Command::Simulate {
            games,
            difficulty,
            seed,
        } => run_simulate(&cli.config, games, difficulty, seed),
    }
}

/// Run the terminal UI
async fn run_play(
    config_path: &Path,
    difficulty: Option<Difficulty>,
    seed: Option<u64>,
) -> Result<()> {
    let mut config = GameConfig::load_or_default(config_path)?;
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    run_tui(config, difficulty).await
}

/// Play a headless batch and print the tally
#[instrument(skip(config_path))]
fn run_simulate(
    config_path: &Path,
    games: u32,
    difficulty: Option<Difficulty>,
    seed: Option<u64>,
) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = GameConfig::load_or_default(config_path)?;
    let difficulty = difficulty.unwrap_or(*config.difficulty());
    let mut rng = match seed.or(*config.seed()) {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };

    info!(games, %difficulty, "Starting simulation");
    let report = simulate(games, difficulty, &mut rng).context("Simulation failed")?;
    println!("{report}");
    Ok(())
}
