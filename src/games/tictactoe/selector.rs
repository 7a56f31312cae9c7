//! Computer move selection.
//!
//! Every difficulty tier currently routes to [`RandomSelector`]. The
//! [`MoveSelector`] trait is where a stronger opponent would plug in.

use super::{Board, Position};
use rand::RngCore;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Difficulty tier chosen on the selection screen.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Random moves.
    #[default]
    Easy,
    /// Same selector as `Easy`.
    Normal,
    /// Same selector as `Easy`.
    Hard,
}

impl Difficulty {
    /// Returns the display label for this tier.
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
        }
    }

    /// All tiers in menu order.
    pub fn all() -> &'static [Difficulty] {
        &[Self::Easy, Self::Normal, Self::Hard]
    }

    /// Returns the selector that plays this tier.
    pub fn selector(self) -> &'static dyn MoveSelector {
        match self {
            Self::Easy | Self::Normal | Self::Hard => &RandomSelector,
        }
    }
}

/// The selector was asked for a move on a full board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SelectorError {
    /// No empty square remains.
    #[display("No empty cell left to play")]
    NoEmptyCell,
}

impl std::error::Error for SelectorError {}

/// Strategy that picks the computer's next square.
pub trait MoveSelector: Send + Sync {
    /// Picks an empty square on `board`.
    fn select(&self, board: &Board, rng: &mut dyn RngCore) -> Result<Position, SelectorError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Picks uniformly among the empty squares.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl MoveSelector for RandomSelector {
    fn select(&self, board: &Board, rng: &mut dyn RngCore) -> Result<Position, SelectorError> {
        board
            .empty_positions()
            .choose(rng)
            .copied()
            .ok_or(SelectorError::NoEmptyCell)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Picks the computer's move for `difficulty`.
#[instrument(skip(board, rng))]
pub fn select_move(
    board: &Board,
    difficulty: Difficulty,
    rng: &mut dyn RngCore,
) -> Result<Position, SelectorError> {
    let selector = difficulty.selector();
    let position = selector.select(board, rng)?;
    debug!(selector = selector.name(), ?position, "Selected computer move");
    Ok(position)
}
