//! Strictly Games tic-tac-toe - play X against a computer opponent.
//!
//! # Architecture
//!
//! - **Board & rules**: placement, win/draw evaluation, reset
//! - **Selector**: picks the computer's square for a [`Difficulty`]
//! - **Controller**: explicit turn state machine for one round
//! - **Session**: the controller plus the computer's thinking timer
//! - **TUI**: difficulty screen and game screen (ratatui)
//!
//! # Example
//!
//! ```
//! use strictly_tictactoe::{Controller, Difficulty, Phase, Position};
//! use rand::SeedableRng;
//!
//! let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(7);
//! let mut game = Controller::new(Difficulty::Easy);
//! assert_eq!(game.human_move(Position::Center), Ok(Phase::ComputerPending));
//! let (reply, phase) = game.computer_move(&mut rng).unwrap();
//! assert_ne!(reply, Position::Center);
//! assert_eq!(phase, Phase::HumanTurn);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod session;
mod simulate;
mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Session and timer
pub use session::{ComputerTurn, GameSession, TimerFired};

// Crate-level exports - Simulation
pub use simulate::{SimulationReport, play_round, simulate};

// Crate-level exports - Terminal UI
pub use tui::run_tui;

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, COMPUTER, Controller, ControllerError, Difficulty, GameStatus, HUMAN, Move, MoveError,
    MoveSelector, Outcome, Phase, Player, Position, RandomSelector, SelectorError, Square, rules,
    select_move,
};
