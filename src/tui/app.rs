//! Application state and logic.

use super::input::{digit_position, move_cursor};
use crate::config::GameConfig;
use crate::games::tictactoe::{COMPUTER, Difficulty, HUMAN, Outcome, Phase, Position};
use crate::session::{ComputerTurn, GameSession};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::ListState;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Pick Easy, Normal or Hard.
    DifficultySelect,
    /// Playing against the computer.
    InGame,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    config: GameConfig,
    screen: Screen,
    menu: ListState,
    session: Option<GameSession>,
    cursor: Position,
    status_message: String,
    restart_at: Option<Instant>,
    should_quit: bool,
}

impl App {
    /// Creates the app on the difficulty screen with the configured tier highlighted.
    #[instrument(skip(config))]
    pub fn new(config: GameConfig) -> Self {
        let mut menu = ListState::default();
        let selected = Difficulty::all()
            .iter()
            .position(|d| d == config.difficulty())
            .unwrap_or(0);
        menu.select(Some(selected));
        Self {
            config,
            screen: Screen::DifficultySelect,
            menu,
            session: None,
            cursor: Position::Center,
            status_message: "Choose a difficulty".to_string(),
            restart_at: None,
            should_quit: false,
        }
    }

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Difficulty menu selection state.
    pub fn menu(&self) -> &ListState {
        &self.menu
    }

    /// The running game, if any.
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Square under the cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// True once the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles a key press.
    #[instrument(skip(self), fields(screen = ?self.screen))]
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.screen {
            Screen::DifficultySelect => self.handle_menu_key(key.code),
            Screen::InGame => self.handle_game_key(key.code),
        }
    }

    /// Applies a due computer move and fires the automatic restart.
    pub fn tick(&mut self, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match session.poll_computer() {
            Ok(Some(ComputerTurn { position, phase })) => {
                debug!(?position, "Computer moved");
                self.on_phase(phase, now);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "Computer move failed");
                self.status_message = e.to_string();
            }
        }

        if self.restart_at.is_some_and(|at| now >= at) {
            self.restart();
        }
    }

    /// Starts a game at the given difficulty.
    #[instrument(skip(self))]
    pub fn start_game(&mut self, difficulty: Difficulty) {
        info!("Starting game");
        self.session = Some(GameSession::new(
            difficulty,
            self.config.thinking_delay(),
            *self.config.seed(),
        ));
        self.screen = Screen::InGame;
        self.cursor = Position::Center;
        self.restart_at = None;
        self.status_message = turn_message(Phase::HumanTurn);
    }

    /// Clears the board and gives the first move back to the human.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.reset();
        }
        self.restart_at = None;
        self.cursor = Position::Center;
        self.status_message = format!("New round. {}", turn_message(Phase::HumanTurn));
    }

    fn handle_menu_key(&mut self, code: KeyCode) {
        let options = Difficulty::all();
        let selected = self.menu.selected().unwrap_or(0);
        match code {
            KeyCode::Up => self.menu.select(Some((selected + options.len() - 1) % options.len())),
            KeyCode::Down => self.menu.select(Some((selected + 1) % options.len())),
            KeyCode::Enter => self.start_game(options[selected.min(options.len() - 1)]),
            KeyCode::Char('e') => self.start_game(Difficulty::Easy),
            KeyCode::Char('n') => self.start_game(Difficulty::Normal),
            KeyCode::Char('h') => self.start_game(Difficulty::Hard),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_game_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                info!("Back to difficulty selection");
                self.session = None;
                self.restart_at = None;
                self.screen = Screen::DifficultySelect;
                self.status_message = "Choose a difficulty".to_string();
            }
            KeyCode::Char('r') => self.restart(),
            KeyCode::Enter | KeyCode::Char(' ') => self.place(self.cursor),
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, code);
            }
            other => {
                if let Some(position) = digit_position(other) {
                    self.cursor = position;
                    self.place(position);
                }
            }
        }
    }

    fn place(&mut self, position: Position) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.controller().accepts_human_input() {
            debug!(?position, "Ignoring input while not the human's turn");
            return;
        }
        match session.human_move(position) {
            Ok(phase) => self.on_phase(phase, Instant::now()),
            Err(e) => {
                debug!(error = %e, "Move rejected");
                self.status_message = e.to_string();
            }
        }
    }

    fn on_phase(&mut self, phase: Phase, now: Instant) {
        if phase.outcome().is_some() {
            self.restart_at = now.checked_add(self.config.restart_delay());
            if self.restart_at.is_none() {
                warn!("Restart delay out of range, automatic restart disabled");
            }
        }
        self.status_message = turn_message(phase);
    }
}

fn turn_message(phase: Phase) -> String {
    match phase {
        Phase::HumanTurn | Phase::Evaluating => format!("Your turn ({})", HUMAN),
        Phase::ComputerPending => format!("Computer ({}) is thinking...", COMPUTER),
        Phase::Over(Outcome::Winner(player)) if player == HUMAN => {
            format!("{} wins! (you)", player)
        }
        Phase::Over(Outcome::Winner(player)) => format!("{} wins! (computer)", player),
        Phase::Over(Outcome::Draw) => "Draw!".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn phase(app: &App) -> Phase {
        *app.session().unwrap().controller().phase()
    }

    /// Plays the lowest free square each turn until the round ends.
    async fn finish_round(app: &mut App, now: Instant) {
        while phase(app).outcome().is_none() {
            let next = app.session().unwrap().controller().board().empty_positions()[0];
            let digit = char::from_digit(next.to_index() as u32 + 1, 10).unwrap();
            app.handle_key(key(KeyCode::Char(digit)));
            while app.session().unwrap().is_thinking() {
                tokio::time::sleep(Duration::from_millis(1)).await;
                app.tick(now);
            }
        }
    }

    #[test]
    fn test_menu_selection_wraps() {
        let mut app = App::new(GameConfig::default());
        assert_eq!(app.menu().selected(), Some(0));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.menu().selected(), Some(2));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.menu().selected(), Some(0));
    }

    #[test]
    fn test_configured_difficulty_preselected() {
        let app = App::new(GameConfig::default().with_difficulty(Difficulty::Hard));
        assert_eq!(app.menu().selected(), Some(2));
    }

    #[test]
    fn test_quit_from_menu() {
        let mut app = App::new(GameConfig::default());
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_input_ignored_while_computer_thinks() {
        let config = GameConfig::default().with_delays(60_000, 0).with_seed(1);
        let mut app = App::new(config);
        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.screen(), Screen::InGame);

        app.handle_key(key(KeyCode::Char('5')));
        app.handle_key(key(KeyCode::Char('1')));

        let session = app.session().unwrap();
        assert!(session.is_thinking());
        assert_eq!(session.controller().history().len(), 1);
        assert_eq!(app.status_message(), "Computer (O) is thinking...");
    }

    #[tokio::test]
    async fn test_finished_round_restarts_after_delay() {
        let config = GameConfig::default().with_delays(0, 5000).with_seed(3);
        let mut app = App::new(config);
        app.handle_key(key(KeyCode::Char('n')));
        let now = Instant::now();
        finish_round(&mut app, now).await;

        let status = app.status_message().to_string();
        assert!(status.contains("wins!") || status == "Draw!", "status: {status}");

        // Not yet due.
        app.tick(now);
        assert!(phase(&app).outcome().is_some());

        app.tick(Instant::now() + Duration::from_secs(6));
        assert_eq!(phase(&app), Phase::HumanTurn);
        assert!(app.session().unwrap().controller().history().is_empty());
        assert!(app.status_message().starts_with("New round"));
    }

    #[tokio::test]
    async fn test_huge_restart_delay_never_restarts_automatically() {
        let config = GameConfig::default().with_delays(0, u64::MAX).with_seed(3);
        let mut app = App::new(config);
        app.handle_key(key(KeyCode::Char('e')));
        finish_round(&mut app, Instant::now()).await;

        app.tick(Instant::now() + Duration::from_secs(60));
        assert!(phase(&app).outcome().is_some());

        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(phase(&app), Phase::HumanTurn);
    }

    #[tokio::test]
    async fn test_restart_key_cancels_pending_computer_move() {
        let config = GameConfig::default().with_delays(20, 0).with_seed(5);
        let mut app = App::new(config);
        app.handle_key(key(KeyCode::Char('h')));
        app.handle_key(key(KeyCode::Char('5')));
        assert!(app.session().unwrap().is_thinking());

        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(phase(&app), Phase::HumanTurn);
        assert!(!app.session().unwrap().is_thinking());

        tokio::time::sleep(Duration::from_millis(50)).await;
        app.tick(Instant::now());
        assert_eq!(phase(&app), Phase::HumanTurn);
        assert_eq!(app.session().unwrap().controller().board().empty_positions().len(), 9);
        assert!(app.session().unwrap().controller().history().is_empty());
    }

    #[tokio::test]
    async fn test_escape_returns_to_menu() {
        let mut app = App::new(GameConfig::default().with_delays(60_000, 0));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('5')));
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.screen(), Screen::DifficultySelect);
        assert!(app.session().is_none());
    }
}
