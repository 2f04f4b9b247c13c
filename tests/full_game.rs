//! End-to-end games driven entirely through the controller. These exercise
//! the whole pipeline at once: search feeding the opponents, placements
//! committed through the validator, turn rotation, game-over detection and
//! the winner rule.

use blokus::bot::{Greedy, Opponent, Random};
use blokus::{GameController, MoveResult, Phase};

fn play_to_completion(controller: &mut GameController, bots: &mut [Box<dyn Opponent>]) {
    // a full game is bounded by pieces * players plus trailing passes;
    // the cap only guards against a stuck loop in case of a regression
    for _ in 0..500 {
        if controller.phase() == Phase::GameOver {
            return;
        }
        let seat = controller.state().current_player;
        let result = controller.play_bot_turn(bots[seat].as_mut());
        assert!(
            !matches!(result, MoveResult::Rejected { .. }),
            "opponent produced an illegal move: {:?}",
            result
        );
    }
    panic!("game did not finish within the turn cap");
}

#[test]
fn test_two_greedy_bots_finish_a_game() {
    let mut controller = GameController::new(2).unwrap();
    let mut bots: Vec<Box<dyn Opponent>> = vec![Box::new(Greedy), Box::new(Greedy)];
    play_to_completion(&mut controller, &mut bots);

    let state = controller.state();
    assert!(state.game_over);
    let winner = state.winner.expect("finished game names a winner");
    assert_eq!(winner, state.leading_player());

    // the recorded score of every player matches what sits on the board
    for player in &state.players {
        assert_eq!(
            player.score as usize,
            state.board.cells_owned_by(player.id),
            "score drift for {}",
            player.name
        );
        assert_eq!(
            (player.stats.moves_made + player.stats.passes) as usize,
            player.move_history.len()
        );
    }
    assert_eq!(state.stats.total_moves as usize, state.turn_history.len());
}

#[test]
fn test_four_random_bots_finish_a_game() {
    let mut controller = GameController::new(4).unwrap();
    let mut bots: Vec<Box<dyn Opponent>> = (0..4)
        .map(|seat| Box::new(Random::new(seat as u64)) as Box<dyn Opponent>)
        .collect();
    play_to_completion(&mut controller, &mut bots);

    let state = controller.state();
    assert!(state.game_over);
    assert!(state.winner.is_some());
    for player in &state.players {
        assert_eq!(player.score as usize, state.board.cells_owned_by(player.id));
    }
}

#[test]
fn test_undo_midgame_rewinds_exactly_one_turn() {
    let mut controller = GameController::new(2).unwrap();
    let mut bots: Vec<Box<dyn Opponent>> = vec![Box::new(Greedy), Box::new(Greedy)];

    for _ in 0..6 {
        let seat = controller.state().current_player;
        controller.play_bot_turn(bots[seat].as_mut());
    }

    let before = controller.state().clone();
    let seat = controller.state().current_player;
    controller.play_bot_turn(bots[seat].as_mut());
    controller.undo().unwrap();

    let after = controller.state();
    assert_eq!(after.board, before.board);
    assert_eq!(after.current_player, before.current_player);
    assert_eq!(after.turn_history.len(), before.turn_history.len());
    for (a, b) in after.players.iter().zip(&before.players) {
        assert_eq!(a.score, b.score);
        assert_eq!(a.pieces, b.pieces);
        assert_eq!(a.stats, b.stats);
    }
}

#[test]
fn test_undo_reopens_a_finished_game() {
    let mut controller = GameController::new(2).unwrap();
    let mut bots: Vec<Box<dyn Opponent>> = vec![Box::new(Greedy), Box::new(Greedy)];
    play_to_completion(&mut controller, &mut bots);
    assert_eq!(controller.phase(), Phase::GameOver);

    controller.undo().unwrap();
    assert_eq!(controller.phase(), Phase::AwaitingMove);
    assert!(controller.state().winner.is_none());
}
