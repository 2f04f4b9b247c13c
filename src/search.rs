//! # Move Search
//!
//! Brute-force enumeration of every (unused piece × rotation × flip × board
//! cell) combination, validated through the placement rules. The same sweep
//! backs game-end detection (`has_any_legal_move`), the computer opponent
//! (`best_move`, greedy on placed area) and full move listings. Bounded and
//! cheap: at worst 21 pieces × 8 orientations × 400 cells.

use crate::board::BOARD_SIZE;
use crate::game::GameState;
use crate::placement::is_legal_placement;
use crate::transform::{Orientation, ROTATIONS};

/// One legal placement found by the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub piece_id: u8,
    pub orientation: Orientation,
    pub origin: (i32, i32),
    /// Cell count of the piece, the score the placement would earn
    pub score_gained: u32,
}

/// Visits legal placements for `player` in canonical order: pieces in
/// catalog order, rotations ascending, unflipped before flipped, rows then
/// columns ascending. Stops early when `visit` returns true.
fn scan<F>(state: &GameState, player: usize, mut visit: F)
where
    F: FnMut(Candidate) -> bool,
{
    let board = &state.board;
    let has_placed = board.has_placed(player);
    for instance in &state.players[player].pieces {
        if instance.used {
            continue;
        }
        for &rotation in &ROTATIONS {
            for flipped in [false, true] {
                let orientation = Orientation::of(&instance.piece.shape, rotation, flipped);
                for row in 0..BOARD_SIZE as i32 {
                    for col in 0..BOARD_SIZE as i32 {
                        if !is_legal_placement(
                            &orientation.cells,
                            (row, col),
                            board,
                            player,
                            has_placed,
                        ) {
                            continue;
                        }
                        let candidate = Candidate {
                            piece_id: instance.piece.id,
                            orientation: orientation.clone(),
                            origin: (row, col),
                            score_gained: instance.piece.size,
                        };
                        if visit(candidate) {
                            return;
                        }
                    }
                }
            }
        }
    }
}

/// Whether `player` still has any legal placement; short-circuits on the
/// first one found.
pub fn has_any_legal_move(state: &GameState, player: usize) -> bool {
    let mut found = false;
    scan(state, player, |_| {
        found = true;
        true
    });
    found
}

/// The greedy opponent policy: the legal candidate with the strictly
/// largest cell count, ties broken by enumeration order. No lookahead.
pub fn best_move(state: &GameState, player: usize) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    scan(state, player, |candidate| {
        let better = best
            .as_ref()
            .map_or(true, |current| candidate.score_gained > current.score_gained);
        if better {
            best = Some(candidate);
        }
        false
    });
    best
}

/// Every legal placement for `player`, in enumeration order.
pub fn legal_moves(state: &GameState, player: usize) -> Vec<Candidate> {
    let mut moves = Vec::new();
    scan(state, player, |candidate| {
        moves.push(candidate);
        false
    });
    moves
}
