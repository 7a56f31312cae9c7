//! Tests for the session's delayed computer reply.

use std::time::Duration;
use strictly_tictactoe::{ComputerTurn, ControllerError, Difficulty, GameSession, Phase, Position};
use tokio::time::{Instant, sleep};

#[tokio::test]
async fn test_computer_replies_after_delay() {
    let delay = Duration::from_millis(40);
    let mut session = GameSession::new(Difficulty::Easy, delay, Some(1));
    let started = Instant::now();

    assert_eq!(session.human_move(Position::Center), Ok(Phase::ComputerPending));
    assert!(session.is_thinking());
    assert_eq!(session.poll_computer(), Ok(None));

    let ComputerTurn { position, phase } = session
        .wait_for_computer()
        .await
        .expect("computer move")
        .expect("move was pending");
    assert!(started.elapsed() >= delay);
    assert_ne!(position, Position::Center);
    assert_eq!(phase, Phase::HumanTurn);
    assert_eq!(session.controller().history().len(), 2);
}

#[tokio::test]
async fn test_board_readable_and_input_blocked_while_thinking() {
    let mut session = GameSession::new(Difficulty::Normal, Duration::from_secs(60), Some(2));
    session.human_move(Position::TopLeft).unwrap();

    assert!(!session.controller().board().is_empty(Position::TopLeft));
    assert_eq!(
        session.human_move(Position::TopRight),
        Err(ControllerError::NotHumanTurn(Phase::ComputerPending))
    );
}

#[tokio::test]
async fn test_reset_cancels_pending_move() {
    let mut session = GameSession::new(Difficulty::Hard, Duration::from_millis(20), Some(3));
    session.human_move(Position::Center).unwrap();
    session.reset();

    sleep(Duration::from_millis(80)).await;
    assert_eq!(session.poll_computer(), Ok(None));
    assert_eq!(*session.controller().phase(), Phase::HumanTurn);
    assert_eq!(session.controller().board().empty_positions().len(), 9);
}

#[tokio::test]
async fn test_stale_timer_discarded_after_reset() {
    let mut session = GameSession::new(Difficulty::Easy, Duration::ZERO, Some(4));
    session.human_move(Position::Center).unwrap();

    // Let the timer fire so its message is already queued.
    sleep(Duration::from_millis(30)).await;
    session.reset();
    assert_eq!(session.poll_computer(), Ok(None));
    assert!(session.controller().history().is_empty());

    session.human_move(Position::BottomLeft).unwrap();
    let turn = session.wait_for_computer().await.unwrap().unwrap();
    assert_ne!(turn.position, Position::BottomLeft);
    assert_eq!(session.controller().history().len(), 2);
}

#[tokio::test]
async fn test_wait_without_pending_move_returns_immediately() {
    let mut session = GameSession::new(Difficulty::Easy, Duration::from_secs(60), None);
    assert_eq!(session.wait_for_computer().await, Ok(None));
}

#[tokio::test]
async fn test_play_full_round_through_session() {
    let mut session = GameSession::new(Difficulty::Normal, Duration::from_millis(1), Some(5));
    loop {
        let target = session.controller().board().empty_positions()[0];
        let mut phase = session.human_move(target).unwrap();
        if phase == Phase::ComputerPending {
            phase = session.wait_for_computer().await.unwrap().unwrap().phase;
        }
        if let Some(outcome) = phase.outcome() {
            assert_eq!(*session.controller().phase(), Phase::Over(outcome));
            break;
        }
    }
}
