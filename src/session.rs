//! Game session: a [`Controller`] plus the computer's thinking timer.
//!
//! After the human moves, the session spawns a Tokio task that sleeps for
//! the thinking delay and then posts a [`TimerFired`] message. The owner
//! applies the computer's move when it collects that message, so the board
//! stays readable while the computer "thinks". Resetting aborts the timer
//! and bumps the generation so a message that already landed is dropped.

use crate::games::tictactoe::{Controller, ControllerError, Difficulty, Phase, Position};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

/// Message posted by the timer task once the thinking delay elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    /// Round generation the timer was scheduled for.
    pub generation: u64,
}

/// The computer's reply, as applied to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputerTurn {
    /// Square the computer played.
    pub position: Position,
    /// Phase after evaluating the computer's move.
    pub phase: Phase,
}

/// One player's game against the computer.
#[derive(Debug)]
pub struct GameSession {
    controller: Controller,
    rng: ChaCha20Rng,
    thinking_delay: Duration,
    generation: u64,
    pending: Option<JoinHandle<()>>,
    timer_tx: mpsc::UnboundedSender<TimerFired>,
    timer_rx: mpsc::UnboundedReceiver<TimerFired>,
}

impl GameSession {
    /// Creates a session. A `seed` makes the computer's choices reproducible.
    #[instrument]
    pub fn new(difficulty: Difficulty, thinking_delay: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        info!(%difficulty, delay_ms = thinking_delay.as_millis() as u64, "Creating game session");
        Self {
            controller: Controller::new(difficulty),
            rng,
            thinking_delay,
            generation: 0,
            pending: None,
            timer_tx,
            timer_rx,
        }
    }

    /// Read-only view of the game.
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// True while the computer's reply is scheduled but not yet applied.
    pub fn is_thinking(&self) -> bool {
        *self.controller.phase() == Phase::ComputerPending
    }

    /// Applies the human's move and, if the round continues, starts the
    /// computer's thinking timer.
    ///
    /// Must be called from within a Tokio runtime.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn human_move(&mut self, position: Position) -> Result<Phase, ControllerError> {
        let phase = self.controller.human_move(position)?;
        if phase == Phase::ComputerPending {
            self.schedule();
        }
        Ok(phase)
    }

    /// Applies the computer's move if its timer has fired; never blocks.
    pub fn poll_computer(&mut self) -> Result<Option<ComputerTurn>, ControllerError> {
        while let Ok(fired) = self.timer_rx.try_recv() {
            if let Some(turn) = self.apply(fired)? {
                return Ok(Some(turn));
            }
        }
        Ok(None)
    }

    /// Waits for the pending computer move and applies it.
    ///
    /// Returns `None` immediately when no computer move is pending.
    pub async fn wait_for_computer(&mut self) -> Result<Option<ComputerTurn>, ControllerError> {
        while self.is_thinking() {
            let Some(fired) = self.timer_rx.recv().await else {
                return Ok(None);
            };
            if let Some(turn) = self.apply(fired)? {
                return Ok(Some(turn));
            }
        }
        Ok(None)
    }

    /// Cancels any pending computer move and starts a fresh round.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.generation += 1;
        self.controller.reset();
    }

    fn schedule(&mut self) {
        self.cancel_pending();
        let generation = self.generation;
        let delay = self.thinking_delay;
        let tx = self.timer_tx.clone();
        debug!(generation, delay_ms = delay.as_millis() as u64, "Scheduling computer move");
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver lives as long as the session.
            let _ = tx.send(TimerFired { generation });
        }));
    }

    fn apply(&mut self, fired: TimerFired) -> Result<Option<ComputerTurn>, ControllerError> {
        if fired.generation != self.generation || !self.is_thinking() {
            debug!(
                fired = fired.generation,
                current = self.generation,
                "Discarding stale timer"
            );
            return Ok(None);
        }
        self.pending = None;
        let (position, phase) = self.controller.computer_move(&mut self.rng)?;
        Ok(Some(ComputerTurn { position, phase }))
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            debug!("Aborting pending computer move");
            handle.abort();
        }
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
