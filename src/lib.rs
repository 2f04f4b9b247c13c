//! # Blokus Arena
//!
//! A move-legality and game-progression engine for the board game Blokus,
//! playable by two or four players with an optional computer opponent.
//!
//! The engine is deliberately passive: it holds no state between calls.
//! The caller owns a [`GameState`] (usually through a [`GameController`])
//! and every operation runs synchronously to completion against it. Moves
//! flow one way per turn: the transform engine produces a candidate shape,
//! the placement validator approves it, the move applier commits it, and
//! the controller advances the turn and asks the move search whether anyone
//! can still play.
//!
//! ## Modules
//! - [`pieces`] - the fixed catalog of 21 polyominoes
//! - [`transform`] - rotation and mirror transforms of piece matrices
//! - [`board`] - the 20x20 grid and starting corners
//! - [`placement`] - the Blokus adjacency rules
//! - [`game`] - the aggregate state and its progression operations
//! - [`search`] - brute-force move enumeration
//! - [`bot`] - the greedy and random computer opponents
//! - [`controller`] - the turn state machine the UI drives
//! - [`storage`] - save/load of the full state as JSON

pub mod board;
pub mod bot;
pub mod controller;
pub mod game;
pub mod pieces;
pub mod placement;
pub mod search;
pub mod storage;
pub mod transform;

pub use board::{starting_corner, Board, Cell, BOARD_SIZE};
pub use controller::{GameController, MoveResult, Phase, PlacementRequest};
pub use game::{GameState, PlacedMove, Player, PlayerColor, TurnAction, TurnRecord};
pub use search::Candidate;
pub use transform::Orientation;

use std::fmt;

/// Every way a core operation can reject a request.
///
/// All of these are non-fatal signals: the operation left the game state
/// exactly as it found it and the caller may simply try something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// The placement violates the adjacency rules or leaves the board
    IllegalPlacement,
    /// A placement request arrived with no active piece
    NoPieceSelected,
    /// Undo was requested on an empty history
    NothingToUndo,
    /// The piece instance has already been placed
    PieceAlreadyUsed(u8),
    /// No catalog piece carries this id
    UnknownPiece(u8),
    /// Blokus is played by exactly two or four players
    InvalidPlayerCount(usize),
    /// The game has ended; reset to play again
    GameAlreadyOver,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::IllegalPlacement => write!(f, "illegal placement"),
            GameError::NoPieceSelected => write!(f, "no piece selected"),
            GameError::NothingToUndo => write!(f, "nothing to undo"),
            GameError::PieceAlreadyUsed(id) => write!(f, "piece {} has already been placed", id),
            GameError::UnknownPiece(id) => write!(f, "unknown piece id {}", id),
            GameError::InvalidPlayerCount(n) => {
                write!(f, "invalid player count {} (expected 2 or 4)", n)
            }
            GameError::GameAlreadyOver => write!(f, "game is already over"),
        }
    }
}

impl std::error::Error for GameError {}
