//! Tic-tac-toe against a computer opponent.

pub mod action;
pub mod controller;
pub mod phases;
pub mod position;
pub mod rules;
pub mod selector;
pub mod types;

pub use action::{Move, MoveError};
pub use controller::{COMPUTER, Controller, ControllerError, HUMAN};
pub use phases::{Outcome, Phase};
pub use position::Position;
pub use selector::{Difficulty, MoveSelector, RandomSelector, SelectorError, select_move};
pub use types::{Board, GameStatus, Player, Square};
