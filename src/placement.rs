//! # Placement Validator
//!
//! Decides whether a transformed piece may be placed at a board position
//! under the Blokus adjacency rules:
//!
//! - every filled cell must land on an empty, in-bounds board cell;
//! - no filled cell may share an edge with one of the acting player's own
//!   pieces;
//! - the player's first piece must cover their starting corner;
//! - every later piece must touch one of the player's pieces diagonally.
//!
//! Contact with opponents' pieces, edge or diagonal, is always allowed.

use crate::board::{starting_corner, Board};
use crate::pieces::Shape;

const EDGE_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL_OFFSETS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Checks a placement of `shape` with its (0,0) cell aligned to `origin`.
///
/// `has_placed` selects which of the two contact rules applies: corner
/// coverage for the first move, diagonal contact for all later moves. A
/// placement clean on occupancy and edges but satisfying neither contact
/// rule is rejected.
pub fn is_legal_placement(
    shape: &Shape,
    origin: (i32, i32),
    board: &Board,
    player: usize,
    has_placed: bool,
) -> bool {
    let corner = starting_corner(player);
    let mut covers_corner = false;
    let mut touches_diagonal = false;

    for (i, row) in shape.iter().enumerate() {
        for (j, &filled) in row.iter().enumerate() {
            if filled != 1 {
                continue;
            }
            let r = origin.0 + i as i32;
            let c = origin.1 + j as i32;

            if !Board::in_bounds(r, c) {
                return false;
            }
            if board.owner(r, c).is_some() {
                return false;
            }
            for (dr, dc) in EDGE_OFFSETS {
                if board.owner(r + dr, c + dc) == Some(player) {
                    return false;
                }
            }

            if !has_placed && (r, c) == corner {
                covers_corner = true;
            }
            for (dr, dc) in DIAGONAL_OFFSETS {
                if board.owner(r + dr, c + dc) == Some(player) {
                    touches_diagonal = true;
                }
            }
        }
    }

    if has_placed {
        touches_diagonal
    } else {
        covers_corner
    }
}

/// First-move origin adjustment.
///
/// When a first-move placement misses the starting corner, try every filled
/// cell of the chosen orientation in row-major order and compute the origin
/// that would put that cell exactly on the corner. The first adjusted origin
/// that validates wins; the orientation itself is never altered.
pub fn adjust_first_move_origin(shape: &Shape, board: &Board, player: usize) -> Option<(i32, i32)> {
    let corner = starting_corner(player);
    for (i, row) in shape.iter().enumerate() {
        for (j, &filled) in row.iter().enumerate() {
            if filled != 1 {
                continue;
            }
            let origin = (corner.0 - i as i32, corner.1 - j as i32);
            if is_legal_placement(shape, origin, board, player, false) {
                return Some(origin);
            }
        }
    }
    None
}
