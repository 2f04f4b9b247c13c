//! # Board
//!
//! The fixed 20×20 Blokus board. Each cell records an optional owning player
//! and the id of the piece that covers it; the board is the sole source of
//! truth for occupancy, including whether a player has placed anything yet.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the square board.
pub const BOARD_SIZE: usize = 20;

/// A single board cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Index of the player occupying this cell, if any
    pub owner: Option<usize>,
    /// Catalog id of the placed piece covering this cell
    pub piece_id: Option<u8>,
}

/// The 20×20 grid, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Vec<Cell>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::default(); BOARD_SIZE * BOARD_SIZE],
        }
    }

    /// Whether signed coordinates fall inside the 0..20 × 0..20 grid.
    pub fn in_bounds(row: i32, col: i32) -> bool {
        row >= 0 && (row as usize) < BOARD_SIZE && col >= 0 && (col as usize) < BOARD_SIZE
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row * BOARD_SIZE + col]
    }

    /// Owner at signed coordinates; out-of-bounds reads as unowned.
    pub fn owner(&self, row: i32, col: i32) -> Option<usize> {
        if Self::in_bounds(row, col) {
            self.cells[row as usize * BOARD_SIZE + col as usize].owner
        } else {
            None
        }
    }

    pub fn occupy(&mut self, row: usize, col: usize, player: usize, piece_id: u8) {
        let cell = &mut self.cells[row * BOARD_SIZE + col];
        cell.owner = Some(player);
        cell.piece_id = Some(piece_id);
    }

    /// Clears every cell owned by `player` and tagged with `piece_id`.
    /// Used by undo to lift a placed piece off the board.
    pub fn clear_piece(&mut self, player: usize, piece_id: u8) {
        for cell in &mut self.cells {
            if cell.owner == Some(player) && cell.piece_id == Some(piece_id) {
                *cell = Cell::default();
            }
        }
    }

    /// Whether `player` has any piece on the board.
    pub fn has_placed(&self, player: usize) -> bool {
        self.cells.iter().any(|cell| cell.owner == Some(player))
    }

    /// Number of cells owned by `player`.
    pub fn cells_owned_by(&self, player: usize) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.owner == Some(player))
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                match self.cell(row, col).owner {
                    Some(player) => write!(f, "{} ", player + 1)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The fixed corner each player's first piece must cover:
/// player 0 top-left, 1 top-right, 2 bottom-right, 3 bottom-left.
pub fn starting_corner(player: usize) -> (i32, i32) {
    let edge = (BOARD_SIZE - 1) as i32;
    match player {
        0 => (0, 0),
        1 => (0, edge),
        2 => (edge, edge),
        _ => (edge, 0),
    }
}
