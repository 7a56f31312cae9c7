//! Turn controller for a human (X) versus computer (O) round.
//!
//! The controller owns the board, the active marker and the difficulty.
//! Each transition is an explicit method call, so the delayed computer
//! reply can be driven by a timer, a test, or a batch simulation alike.

use super::action::{Move, MoveError};
use super::phases::{Outcome, Phase};
use super::selector::{Difficulty, SelectorError, select_move};
use super::{Board, GameStatus, Player, Position};
use derive_getters::Getters;
use rand::RngCore;
use tracing::{debug, info, instrument, warn};

/// The human's marker.
pub const HUMAN: Player = Player::X;
/// The computer's marker.
pub const COMPUTER: Player = Player::O;

/// Rejected controller transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ControllerError {
    /// The placement itself was invalid.
    #[display("Invalid move: {}", _0)]
    InvalidMove(MoveError),

    /// The selector found nothing to play.
    #[display("Computer could not move: {}", _0)]
    Selector(SelectorError),

    /// Human input arrived outside the human's turn.
    #[display("Not the human's turn ({})", _0)]
    NotHumanTurn(Phase),

    /// A computer move was requested outside `ComputerPending`.
    #[display("Not the computer's turn ({})", _0)]
    NotComputerTurn(Phase),
}

impl From<MoveError> for ControllerError {
    fn from(err: MoveError) -> Self {
        ControllerError::InvalidMove(err)
    }
}

impl From<SelectorError> for ControllerError {
    fn from(err: SelectorError) -> Self {
        ControllerError::Selector(err)
    }
}

impl std::error::Error for ControllerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ControllerError::InvalidMove(err) => Some(err),
            ControllerError::Selector(err) => Some(err),
            ControllerError::NotHumanTurn(_) | ControllerError::NotComputerTurn(_) => None,
        }
    }
}

/// State machine for one game against the computer.
#[derive(Debug, Clone, Getters)]
pub struct Controller {
    /// The board.
    board: Board,
    /// Marker of the side to move.
    to_move: Player,
    /// Difficulty chosen for this game.
    difficulty: Difficulty,
    /// Current phase.
    phase: Phase,
    /// Moves played in the current round.
    history: Vec<Move>,
}

impl Controller {
    /// Creates a controller waiting for the human's first move.
    #[instrument]
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            board: Board::new(),
            to_move: HUMAN,
            difficulty,
            phase: Phase::HumanTurn,
            history: Vec::new(),
        }
    }

    /// True when a human placement would be accepted.
    pub fn accepts_human_input(&self) -> bool {
        self.phase.accepts_human_input()
    }

    /// Applies the human's move.
    ///
    /// Returns the phase after evaluation: `Over` or `ComputerPending`.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn human_move(&mut self, position: Position) -> Result<Phase, ControllerError> {
        if self.phase != Phase::HumanTurn {
            warn!("Human move rejected outside human turn");
            return Err(ControllerError::NotHumanTurn(self.phase));
        }

        self.place(position)?;
        Ok(self.evaluate(Phase::ComputerPending))
    }

    /// Picks and applies the computer's move.
    ///
    /// Returns the chosen square and the phase after evaluation:
    /// `Over` or `HumanTurn`.
    #[instrument(skip(self, rng), fields(phase = %self.phase, difficulty = %self.difficulty))]
    pub fn computer_move(
        &mut self,
        rng: &mut dyn RngCore,
    ) -> Result<(Position, Phase), ControllerError> {
        if self.phase != Phase::ComputerPending {
            warn!("Computer move requested outside computer turn");
            return Err(ControllerError::NotComputerTurn(self.phase));
        }

        let position = select_move(&self.board, self.difficulty, rng)?;
        self.place(position)?;
        Ok((position, self.evaluate(Phase::HumanTurn)))
    }

    /// Clears the board and hands the first move back to the human.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn reset(&mut self) {
        info!("Resetting round");
        self.board.reset();
        self.history.clear();
        self.to_move = HUMAN;
        self.phase = Phase::HumanTurn;
    }

    /// Scores the board, as the UI would after any placement.
    pub fn status(&self) -> GameStatus {
        self.board.evaluate()
    }

    fn place(&mut self, position: Position) -> Result<(), MoveError> {
        let player = self.to_move;
        self.board.place(position, player)?;
        self.history.push(Move::new(player, position));
        self.phase = Phase::Evaluating;
        debug!(%player, ?position, "Placed mark");
        Ok(())
    }

    /// Moves from `Evaluating` to `Over`, or to `next` with the marker flipped.
    fn evaluate(&mut self, next: Phase) -> Phase {
        self.phase = match Outcome::from_status(self.board.evaluate()) {
            Some(outcome) => {
                info!(%outcome, plies = self.history.len(), "Round over");
                Phase::Over(outcome)
            }
            None => {
                self.to_move = self.to_move.opponent();
                next
            }
        };
        self.phase
    }
}
