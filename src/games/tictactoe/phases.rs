//! Turn phases and round outcomes for the game controller.

use super::{GameStatus, Player};
use serde::{Deserialize, Serialize};

/// Outcome of a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player won the round.
    Winner(Player),
    /// Round ended in a draw.
    Draw,
}

impl Outcome {
    /// Converts a terminal status into an outcome; `InProgress` yields `None`.
    pub fn from_status(status: GameStatus) -> Option<Self> {
        match status {
            GameStatus::InProgress => None,
            GameStatus::Won(player) => Some(Outcome::Winner(player)),
            GameStatus::Draw => Some(Outcome::Draw),
        }
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the round was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "{} wins", player),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Where the controller is in a round.
///
/// `Evaluating` is only observable while a placement is being scored;
/// every public controller method leaves the controller in one of the
/// other three phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the human (X) to pick a square.
    HumanTurn,
    /// A placement was made and the board is being scored.
    Evaluating,
    /// The computer (O) will reply once its thinking delay elapses.
    ComputerPending,
    /// The round is over; only a reset leaves this phase.
    Over(Outcome),
}

impl Phase {
    /// True only in [`Phase::HumanTurn`].
    pub fn accepts_human_input(self) -> bool {
        matches!(self, Phase::HumanTurn)
    }

    /// Returns the outcome when the round is over.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Phase::Over(outcome) => Some(outcome),
            _ => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::HumanTurn => write!(f, "human turn"),
            Phase::Evaluating => write!(f, "evaluating"),
            Phase::ComputerPending => write!(f, "computer thinking"),
            Phase::Over(outcome) => write!(f, "over ({})", outcome),
        }
    }
}
