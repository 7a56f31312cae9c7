//! Tests for the turn controller state machine.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use strictly_tictactoe::{
    COMPUTER, Controller, ControllerError, Difficulty, GameStatus, HUMAN, MoveError, Outcome, Phase,
    Player, Position,
};

#[test]
fn test_round_alternates_markers() {
    let mut controller = Controller::new(Difficulty::Easy);
    let mut rng = ChaCha20Rng::seed_from_u64(10);

    assert_eq!(*controller.phase(), Phase::HumanTurn);
    assert_eq!(*controller.to_move(), HUMAN);

    controller.human_move(Position::Center).unwrap();
    assert_eq!(*controller.to_move(), COMPUTER);

    let (reply, phase) = controller.computer_move(&mut rng).unwrap();
    assert_eq!(phase, Phase::HumanTurn);
    assert_eq!(*controller.to_move(), HUMAN);

    let history = controller.history();
    assert_eq!(history[0].player(), Player::X);
    assert_eq!(history[0].position(), Position::Center);
    assert_eq!(history[1].player(), Player::O);
    assert_eq!(history[1].position(), reply);
    assert_eq!(controller.board().count(Player::X), 1);
    assert_eq!(controller.board().count(Player::O), 1);
}

#[test]
fn test_finished_round_rejects_further_moves() {
    let mut controller = Controller::new(Difficulty::Normal);
    let mut rng = ChaCha20Rng::seed_from_u64(0);

    // Keep trying the top row; pick a free square whenever the computer blocks it.
    let mut phase = Phase::HumanTurn;
    while phase.outcome().is_none() {
        let target = [Position::TopLeft, Position::TopCenter, Position::TopRight]
            .into_iter()
            .chain(Position::ALL)
            .find(|&pos| controller.board().is_empty(pos))
            .unwrap();
        phase = controller.human_move(target).unwrap();
        if phase == Phase::ComputerPending {
            phase = controller.computer_move(&mut rng).unwrap().1;
        }
    }

    let outcome = phase.outcome().unwrap();
    assert_eq!(Outcome::from_status(controller.status()), Some(outcome));
    assert_eq!(
        controller.human_move(Position::Center).unwrap_err(),
        ControllerError::NotHumanTurn(Phase::Over(outcome))
    );
    assert_eq!(
        controller.computer_move(&mut rng).unwrap_err(),
        ControllerError::NotComputerTurn(Phase::Over(outcome))
    );
}

#[test]
fn test_reset_from_every_phase() {
    let mut rng = ChaCha20Rng::seed_from_u64(8);

    let mut controller = Controller::new(Difficulty::Hard);
    controller.reset();
    assert_eq!(*controller.phase(), Phase::HumanTurn);

    controller.human_move(Position::TopLeft).unwrap();
    assert_eq!(*controller.phase(), Phase::ComputerPending);
    controller.reset();
    assert_eq!(*controller.phase(), Phase::HumanTurn);
    assert_eq!(controller.status(), GameStatus::InProgress);
    assert!(controller.history().is_empty());
    assert_eq!(*controller.difficulty(), Difficulty::Hard);

    let (outcome, _) = strictly_tictactoe::play_round(&mut controller, &mut rng).unwrap();
    assert_eq!(*controller.phase(), Phase::Over(outcome));
    controller.reset();
    assert_eq!(*controller.phase(), Phase::HumanTurn);
    assert_eq!(*controller.to_move(), HUMAN);
    assert_eq!(controller.board().empty_positions().len(), 9);
}

#[test]
fn test_invalid_human_move_is_recoverable() {
    let mut controller = Controller::new(Difficulty::Easy);
    let mut rng = ChaCha20Rng::seed_from_u64(21);
    controller.human_move(Position::Center).unwrap();
    let (reply, _) = controller.computer_move(&mut rng).unwrap();

    for taken in [Position::Center, reply] {
        assert_eq!(
            controller.human_move(taken),
            Err(ControllerError::InvalidMove(MoveError::SquareOccupied(taken)))
        );
    }
    assert!(controller.accepts_human_input());
    let free = controller.board().empty_positions()[0];
    assert_eq!(controller.human_move(free), Ok(Phase::ComputerPending));
}

#[test]
fn test_full_rounds_always_terminate() {
    let mut rng = ChaCha20Rng::seed_from_u64(64);
    for &difficulty in Difficulty::all() {
        let mut controller = Controller::new(difficulty);
        for _ in 0..100 {
            let (outcome, plies) =
                strictly_tictactoe::play_round(&mut controller, &mut rng).unwrap();
            assert!((5..=9).contains(&plies));
            if outcome.is_draw() {
                assert_eq!(plies, 9);
                assert!(controller.board().is_full());
            }
        }
    }
}
