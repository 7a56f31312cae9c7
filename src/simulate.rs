//! Headless batches of games for smoke-testing the controller.
//!
//! A random stand-in plays X; the computer plays O at the chosen
//! difficulty. The computer replies immediately, with no thinking delay.

use crate::games::tictactoe::{
    COMPUTER, Controller, ControllerError, Difficulty, HUMAN, MoveSelector, Outcome, Phase,
    RandomSelector,
};
use derive_getters::Getters;
use rand::RngCore;
use tracing::{debug, info, instrument};

/// Tally of a simulated batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters)]
pub struct SimulationReport {
    /// Difficulty the computer played at.
    difficulty: Difficulty,
    /// Rounds played.
    games: u32,
    /// Rounds won by the stand-in (X).
    human_wins: u32,
    /// Rounds won by the computer (O).
    computer_wins: u32,
    /// Drawn rounds.
    draws: u32,
    /// Total plies across all rounds.
    plies: u64,
}

impl SimulationReport {
    fn record(&mut self, outcome: Outcome, plies: usize) {
        self.games += 1;
        self.plies += plies as u64;
        if outcome.is_draw() {
            self.draws += 1;
        } else if outcome.winner() == Some(HUMAN) {
            self.human_wins += 1;
        } else if outcome.winner() == Some(COMPUTER) {
            self.computer_wins += 1;
        }
    }
}

impl std::fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Difficulty:    {}", self.difficulty.label())?;
        writeln!(f, "Games:         {}", self.games)?;
        writeln!(f, "X (stand-in):  {}", self.human_wins)?;
        writeln!(f, "O (computer):  {}", self.computer_wins)?;
        write!(f, "Draws:         {}", self.draws)
    }
}

/// Plays one round to completion and returns its outcome and ply count.
#[instrument(skip(controller, rng))]
pub fn play_round(
    controller: &mut Controller,
    rng: &mut dyn RngCore,
) -> Result<(Outcome, usize), ControllerError> {
    controller.reset();
    loop {
        let position = RandomSelector.select(controller.board(), rng)?;
        let mut phase = controller.human_move(position)?;
        if phase == Phase::ComputerPending {
            let (_, next) = controller.computer_move(rng)?;
            phase = next;
        }
        if let Phase::Over(outcome) = phase {
            debug!(%outcome, plies = controller.history().len(), "Simulated round finished");
            return Ok((outcome, controller.history().len()));
        }
    }
}

/// Plays `games` rounds at `difficulty`.
#[instrument(skip(rng))]
pub fn simulate(
    games: u32,
    difficulty: Difficulty,
    rng: &mut dyn RngCore,
) -> Result<SimulationReport, ControllerError> {
    let mut controller = Controller::new(difficulty);
    let mut report = SimulationReport {
        difficulty,
        ..SimulationReport::default()
    };
    for _ in 0..games {
        let (outcome, plies) = play_round(&mut controller, rng)?;
        report.record(outcome, plies);
    }
    info!(
        games = report.games,
        human_wins = report.human_wins,
        computer_wins = report.computer_wins,
        draws = report.draws,
        "Simulation complete"
    );
    Ok(report)
}
