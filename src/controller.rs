//! # Turn Controller
//!
//! The caller-facing orchestration layer over [`GameState`]. It owns the
//! authoritative state, tracks the currently selected piece and the
//! tentative placement awaiting confirmation, and funnels every mutation
//! (confirm, pass, undo, reset, bot turns) through the core operations.
//!
//! The controller moves through three phases: `AwaitingMove` while the
//! current player is free to act, `MoveConfirmationPending` once a board
//! position has been requested for the selected piece, and `GameOver` when
//! no player has a legal move left.

use crate::bot::Opponent;
use crate::game::{GameState, PlacedMove};
use crate::GameError;
use std::str::FromStr;

/// Where the controller stands in the turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingMove,
    MoveConfirmationPending,
    GameOver,
}

/// The piece and transform the current player is holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedPiece {
    pub piece_id: u8,
    pub rotation: u16,
    pub flipped: bool,
}

/// Result of attempting to commit a turn.
#[derive(Debug, Clone)]
pub enum MoveResult {
    /// A placement was applied
    Placed {
        placed: PlacedMove,
        player: usize,
        game_over: bool,
        winner: Option<usize>,
    },
    /// A pass was recorded
    Passed {
        player: usize,
        game_over: bool,
        winner: Option<usize>,
    },
    /// The attempt was rejected; state is unchanged
    Rejected { reason: GameError },
    /// Game is already over, no more turns allowed
    GameOver,
}

/// A fully specified placement request, as parsed from the caller:
/// `piece_id,rotation,flip,row,col` (optionally parenthesized).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRequest {
    pub piece_id: u8,
    pub rotation: u16,
    pub flipped: bool,
    pub row: i32,
    pub col: i32,
}

impl FromStr for PlacementRequest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('(').unwrap_or(s);
        let s = s.strip_suffix(')').unwrap_or(s);
        let parts: Vec<&str> = s.split(',').map(|p| p.trim()).collect();
        if parts.len() != 5 {
            return Err("expected format: piece_id,rotation,flip,row,col".to_string());
        }
        let piece_id = parts[0].parse::<u8>().map_err(|e| e.to_string())?;
        let rotation = parts[1].parse::<u16>().map_err(|e| e.to_string())?;
        let flipped = match parts[2] {
            "0" | "false" | "n" => false,
            "1" | "true" | "y" => true,
            other => return Err(format!("invalid flip flag: {}", other)),
        };
        let row = parts[3].parse::<i32>().map_err(|e| e.to_string())?;
        let col = parts[4].parse::<i32>().map_err(|e| e.to_string())?;
        Ok(PlacementRequest {
            piece_id,
            rotation,
            flipped,
            row,
            col,
        })
    }
}

/// Owns the authoritative game state and the in-flight selection.
#[derive(Debug, Clone)]
pub struct GameController {
    state: GameState,
    selected: Option<SelectedPiece>,
    candidate: Option<(i32, i32)>,
}

impl GameController {
    pub fn new(player_count: usize) -> Result<Self, GameError> {
        Ok(Self {
            state: GameState::new(player_count)?,
            selected: None,
            candidate: None,
        })
    }

    /// Resumes a controller around a previously saved state.
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            selected: None,
            candidate: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn selected(&self) -> Option<SelectedPiece> {
        self.selected
    }

    pub fn phase(&self) -> Phase {
        if self.state.game_over {
            Phase::GameOver
        } else if self.candidate.is_some() {
            Phase::MoveConfirmationPending
        } else {
            Phase::AwaitingMove
        }
    }

    /// Picks up a piece (with its transform) for the current player.
    pub fn select_piece(&mut self, piece_id: u8, rotation: u16, flipped: bool) -> Result<(), GameError> {
        let instance = self
            .state
            .current()
            .piece(piece_id)
            .ok_or(GameError::UnknownPiece(piece_id))?;
        if instance.used {
            return Err(GameError::PieceAlreadyUsed(piece_id));
        }
        self.selected = Some(SelectedPiece {
            piece_id,
            rotation,
            flipped,
        });
        self.candidate = None;
        Ok(())
    }

    /// A board tap: remembers the target cell as a tentative placement.
    /// Arriving without a selected piece is reported and ignored.
    pub fn request_placement(&mut self, origin: (i32, i32)) -> Result<(), GameError> {
        if self.state.game_over {
            return Err(GameError::GameAlreadyOver);
        }
        if self.selected.is_none() {
            return Err(GameError::NoPieceSelected);
        }
        self.candidate = Some(origin);
        Ok(())
    }

    /// Commits the pending placement through the move applier.
    pub fn confirm_placement(&mut self) -> MoveResult {
        if self.state.game_over {
            return MoveResult::GameOver;
        }
        let (selected, origin) = match (self.selected, self.candidate.take()) {
            (Some(selected), Some(origin)) => (selected, origin),
            _ => {
                return MoveResult::Rejected {
                    reason: GameError::NoPieceSelected,
                }
            }
        };
        let player = self.state.current_player;
        match self
            .state
            .apply_move(selected.piece_id, selected.rotation, selected.flipped, origin)
        {
            Ok(placed) => {
                self.selected = None;
                MoveResult::Placed {
                    placed,
                    player,
                    game_over: self.state.game_over,
                    winner: self.state.winner,
                }
            }
            Err(reason) => MoveResult::Rejected { reason },
        }
    }

    /// Discards the tentative placement; selection and state are untouched.
    pub fn cancel_placement(&mut self) {
        self.candidate = None;
    }

    pub fn pass(&mut self) -> Result<MoveResult, GameError> {
        self.selected = None;
        self.candidate = None;
        let player = self.state.current_player;
        self.state.pass()?;
        Ok(MoveResult::Passed {
            player,
            game_over: self.state.game_over,
            winner: self.state.winner,
        })
    }

    pub fn undo(&mut self) -> Result<(), GameError> {
        self.candidate = None;
        self.state.undo()
    }

    pub fn reset(&mut self) {
        self.selected = None;
        self.candidate = None;
        self.state.reset();
    }

    /// Runs one full computer turn: ask the opponent for a move and apply
    /// it, or pass for it when it is blocked. Must run to completion before
    /// any further input is fed in; there is no cancellation.
    pub fn play_bot_turn(&mut self, bot: &mut dyn Opponent) -> MoveResult {
        if self.state.game_over {
            return MoveResult::GameOver;
        }
        let player = self.state.current_player;
        match bot.choose_move(&self.state, player) {
            Some(candidate) => match self.state.apply_move(
                candidate.piece_id,
                candidate.orientation.rotation,
                candidate.orientation.flipped,
                candidate.origin,
            ) {
                Ok(placed) => MoveResult::Placed {
                    placed,
                    player,
                    game_over: self.state.game_over,
                    winner: self.state.winner,
                },
                Err(reason) => MoveResult::Rejected { reason },
            },
            None => match self.state.pass() {
                Ok(()) => MoveResult::Passed {
                    player,
                    game_over: self.state.game_over,
                    winner: self.state.winner,
                },
                Err(reason) => MoveResult::Rejected { reason },
            },
        }
    }
}
