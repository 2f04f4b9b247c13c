//! # Game State and Progression
//!
//! The aggregate game state (board, players, histories, turn index) together
//! with the operations that advance it: applying a validated placement,
//! passing, undo and reset. The engine holds no state of its own between
//! calls; the caller owns a `GameState` value and every operation mutates it
//! run-to-completion, leaving it untouched on rejection.
//!
//! Game-over detection runs after every committed move or pass: when no
//! player has a legal move left the game ends and the winner is the first
//! player with the maximal score. A blocked player is never auto-passed;
//! they stay current until an explicit pass arrives.

use crate::board::Board;
use crate::pieces::{self, PieceInstance};
use crate::placement::{adjust_first_move_origin, is_legal_placement};
use crate::search;
use crate::transform::Orientation;
use crate::GameError;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// The four seat colors, in seating order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerColor {
    Blue,
    Red,
    Green,
    Yellow,
}

impl PlayerColor {
    /// The display color used by the original board skin.
    pub fn hex(&self) -> &'static str {
        match self {
            PlayerColor::Blue => "#3498db",
            PlayerColor::Red => "#e74c3c",
            PlayerColor::Green => "#2ecc71",
            PlayerColor::Yellow => "#f1c40f",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlayerColor::Blue => "Blue",
            PlayerColor::Red => "Red",
            PlayerColor::Green => "Green",
            PlayerColor::Yellow => "Yellow",
        }
    }
}

/// What a turn record describes: a committed placement or a pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnAction {
    Placement {
        piece_id: u8,
        piece_name: String,
        origin: (i32, i32),
        score_gained: u32,
    },
    Pass,
}

/// One entry of the move history, kept both per player and globally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub player: usize,
    pub timestamp: SystemTime,
    pub action: TurnAction,
}

/// Per-player counters maintained alongside the history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub moves_made: u32,
    pub passes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: usize,
    pub name: String,
    pub color: PlayerColor,
    pub score: u32,
    pub pieces: Vec<PieceInstance>,
    pub move_history: Vec<TurnRecord>,
    pub stats: PlayerStats,
}

impl Player {
    fn new(id: usize, name: String, color: PlayerColor) -> Self {
        Self {
            id,
            name,
            color,
            score: 0,
            pieces: pieces::fresh_set(),
            move_history: Vec::new(),
            stats: PlayerStats::default(),
        }
    }

    /// Looks up one of the player's 21 piece instances by catalog id.
    pub fn piece(&self, piece_id: u8) -> Option<&PieceInstance> {
        self.pieces.iter().find(|p| p.piece.id == piece_id)
    }

    fn piece_mut(&mut self, piece_id: u8) -> Option<&mut PieceInstance> {
        self.pieces.iter_mut().find(|p| p.piece.id == piece_id)
    }

    pub fn unused_pieces(&self) -> impl Iterator<Item = &PieceInstance> {
        self.pieces.iter().filter(|p| !p.used)
    }
}

/// Process-wide counters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub start_time: SystemTime,
    pub total_moves: u32,
}

/// Outcome of a successfully applied placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedMove {
    pub piece_id: u8,
    /// Final origin after any first-move adjustment
    pub origin: (i32, i32),
    pub score_gained: u32,
}

/// The full game state for a two- or four-player game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub players: Vec<Player>,
    pub current_player: usize,
    pub turn_history: Vec<TurnRecord>,
    pub game_over: bool,
    pub winner: Option<usize>,
    pub stats: GameStats,
}

impl GameState {
    /// Creates a fresh game for 2 or 4 players. Seat colors follow the
    /// original app: Blue and Red head-to-head, all four colors otherwise.
    pub fn new(player_count: usize) -> Result<Self, GameError> {
        let colors = match player_count {
            2 => vec![PlayerColor::Blue, PlayerColor::Red],
            4 => vec![
                PlayerColor::Blue,
                PlayerColor::Red,
                PlayerColor::Green,
                PlayerColor::Yellow,
            ],
            _ => return Err(GameError::InvalidPlayerCount(player_count)),
        };
        let players = colors
            .into_iter()
            .enumerate()
            .map(|(id, color)| Player::new(id, format!("Player {}", id + 1), color))
            .collect();
        Ok(Self {
            board: Board::new(),
            players,
            current_player: 0,
            turn_history: Vec::new(),
            game_over: false,
            winner: None,
            stats: GameStats {
                start_time: SystemTime::now(),
                total_moves: 0,
            },
        })
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn current(&self) -> &Player {
        &self.players[self.current_player]
    }

    /// Whether `player` has committed at least one placement, read off the
    /// board itself.
    pub fn has_placed(&self, player: usize) -> bool {
        self.board.has_placed(player)
    }

    /// Applies a placement for the current player.
    ///
    /// The piece is transformed (flip first, then rotation), validated, and
    /// committed: the instance flips to used, the player gains the piece's
    /// cell count, matching records land in both histories, the board cells
    /// take the player's ownership and piece tag, and the turn advances
    /// cyclically.
    ///
    /// A first move whose origin misses the starting corner is auto-adjusted
    /// by sliding the orientation so one of its filled cells covers the
    /// corner; the returned `PlacedMove` carries the origin actually used.
    /// Any rejection leaves the state unchanged.
    pub fn apply_move(
        &mut self,
        piece_id: u8,
        rotation: u16,
        flipped: bool,
        origin: (i32, i32),
    ) -> Result<PlacedMove, GameError> {
        if self.game_over {
            return Err(GameError::GameAlreadyOver);
        }
        let mover = self.current_player;
        let instance = self.players[mover]
            .piece(piece_id)
            .ok_or(GameError::UnknownPiece(piece_id))?;
        if instance.used {
            return Err(GameError::PieceAlreadyUsed(piece_id));
        }
        let piece_name = instance.piece.name.clone();
        let orientation = Orientation::of(&instance.piece.shape, rotation, flipped);

        let has_placed = self.board.has_placed(mover);
        let origin = if is_legal_placement(&orientation.cells, origin, &self.board, mover, has_placed)
        {
            origin
        } else if !has_placed {
            adjust_first_move_origin(&orientation.cells, &self.board, mover)
                .ok_or(GameError::IllegalPlacement)?
        } else {
            return Err(GameError::IllegalPlacement);
        };

        let score_gained = orientation
            .cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == 1)
            .count() as u32;
        let record = TurnRecord {
            player: mover,
            timestamp: SystemTime::now(),
            action: TurnAction::Placement {
                piece_id,
                piece_name,
                origin,
                score_gained,
            },
        };

        for (i, row) in orientation.cells.iter().enumerate() {
            for (j, &filled) in row.iter().enumerate() {
                if filled == 1 {
                    let r = (origin.0 + i as i32) as usize;
                    let c = (origin.1 + j as i32) as usize;
                    self.board.occupy(r, c, mover, piece_id);
                }
            }
        }

        let player = &mut self.players[mover];
        if let Some(instance) = player.piece_mut(piece_id) {
            instance.used = true;
        }
        player.score += score_gained;
        player.stats.moves_made += 1;
        player.move_history.push(record.clone());

        self.turn_history.push(record);
        self.stats.total_moves += 1;
        self.advance_turn();
        self.refresh_game_over();

        Ok(PlacedMove {
            piece_id,
            origin,
            score_gained,
        })
    }

    /// Records a pass for the current player and advances the turn.
    pub fn pass(&mut self) -> Result<(), GameError> {
        if self.game_over {
            return Err(GameError::GameAlreadyOver);
        }
        let passer = self.current_player;
        let record = TurnRecord {
            player: passer,
            timestamp: SystemTime::now(),
            action: TurnAction::Pass,
        };

        let player = &mut self.players[passer];
        player.stats.passes += 1;
        player.move_history.push(record.clone());

        self.turn_history.push(record);
        self.stats.total_moves += 1;
        self.advance_turn();
        self.refresh_game_over();
        Ok(())
    }

    /// Reverts the most recent move or pass across all players.
    ///
    /// Undoing a placement lifts the piece off the board, marks the instance
    /// unused and takes back the score it gained; either kind trims both
    /// histories and counters, and hands the turn back to the player whose
    /// action was undone. An empty history is reported, not a crash.
    pub fn undo(&mut self) -> Result<(), GameError> {
        let record = self.turn_history.pop().ok_or(GameError::NothingToUndo)?;
        let mover = record.player;

        match record.action {
            TurnAction::Placement {
                piece_id,
                score_gained,
                ..
            } => {
                self.board.clear_piece(mover, piece_id);
                let player = &mut self.players[mover];
                if let Some(instance) = player.piece_mut(piece_id) {
                    instance.used = false;
                }
                player.score -= score_gained;
                player.stats.moves_made -= 1;
                player.move_history.pop();
            }
            TurnAction::Pass => {
                let player = &mut self.players[mover];
                player.stats.passes -= 1;
                player.move_history.pop();
            }
        }

        self.stats.total_moves -= 1;
        // restore the mover as current rather than stepping the index back;
        // undo never replays intermediate turns
        self.current_player = mover;
        self.game_over = false;
        self.winner = None;
        Ok(())
    }

    /// Regenerates a fresh board and full piece sets, clearing histories,
    /// scores and flags. Player identities and seat colors survive.
    pub fn reset(&mut self) {
        self.board = Board::new();
        for player in &mut self.players {
            player.score = 0;
            player.pieces = pieces::fresh_set();
            player.move_history.clear();
            player.stats = PlayerStats::default();
        }
        self.current_player = 0;
        self.turn_history.clear();
        self.game_over = false;
        self.winner = None;
        self.stats = GameStats {
            start_time: SystemTime::now(),
            total_moves: 0,
        };
    }

    fn advance_turn(&mut self) {
        self.current_player = (self.current_player + 1) % self.players.len();
    }

    /// First player holding the maximal score, in seat order.
    pub fn leading_player(&self) -> usize {
        let mut best = 0;
        for (idx, player) in self.players.iter().enumerate() {
            if player.score > self.players[best].score {
                best = idx;
            }
        }
        best
    }

    /// Ends the game once every player is out of legal moves.
    fn refresh_game_over(&mut self) {
        if self.game_over {
            return;
        }
        let all_blocked =
            (0..self.players.len()).all(|player| !search::has_any_legal_move(self, player));
        if all_blocked {
            self.game_over = true;
            self.winner = Some(self.leading_player());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_player_game() -> GameState {
        GameState::new(2).unwrap()
    }

    #[test]
    fn test_new_game() {
        let game = two_player_game();
        assert_eq!(game.player_count(), 2);
        assert_eq!(game.current_player, 0);
        assert!(!game.game_over);
        assert_eq!(game.winner, None);
        assert_eq!(game.players[0].color, PlayerColor::Blue);
        assert_eq!(game.players[1].color, PlayerColor::Red);
        for player in &game.players {
            assert_eq!(player.pieces.len(), 21);
            assert_eq!(player.score, 0);
        }
        assert!(GameState::new(3).is_err());
        assert!(GameState::new(0).is_err());
    }

    #[test]
    fn test_apply_move_commits_everything() {
        let mut game = two_player_game();
        // Square Tetromino (id 6) at the top-left corner
        let placed = game.apply_move(6, 0, false, (0, 0)).unwrap();
        assert_eq!(placed.score_gained, 4);
        assert_eq!(placed.origin, (0, 0));

        assert_eq!(game.board.owner(0, 0), Some(0));
        assert_eq!(game.board.owner(1, 1), Some(0));
        assert_eq!(game.board.cell(0, 0).piece_id, Some(6));
        assert_eq!(game.players[0].score, 4);
        assert!(game.players[0].piece(6).unwrap().used);
        assert_eq!(game.players[0].move_history.len(), 1);
        assert_eq!(game.players[0].stats.moves_made, 1);
        assert_eq!(game.turn_history.len(), 1);
        assert_eq!(game.stats.total_moves, 1);
        assert_eq!(game.current_player, 1);
    }

    #[test]
    fn test_rejection_leaves_state_unchanged() {
        let mut game = two_player_game();
        game.apply_move(1, 0, false, (0, 0)).unwrap();
        game.pass().unwrap();

        let before = game.clone();
        // edge-adjacent to player 0's own monomino
        let err = game.apply_move(2, 0, false, (0, 1)).unwrap_err();
        assert_eq!(err, GameError::IllegalPlacement);
        assert_eq!(game.board, before.board);
        assert_eq!(game.players[0].score, before.players[0].score);
        assert_eq!(game.current_player, before.current_player);
        assert_eq!(game.turn_history.len(), before.turn_history.len());
    }

    #[test]
    fn test_reusing_a_piece_is_rejected() {
        let mut game = two_player_game();
        game.apply_move(1, 0, false, (0, 0)).unwrap();
        game.pass().unwrap();
        let err = game.apply_move(1, 0, false, (1, 1)).unwrap_err();
        assert_eq!(err, GameError::PieceAlreadyUsed(1));
        assert_eq!(
            game.apply_move(99, 0, false, (1, 1)).unwrap_err(),
            GameError::UnknownPiece(99)
        );
    }

    #[test]
    fn test_first_move_auto_adjust() {
        let mut game = two_player_game();
        // a first move nowhere near the corner slides onto it
        let placed = game.apply_move(6, 0, false, (10, 10)).unwrap();
        assert_eq!(placed.origin, (0, 0));
        assert_eq!(game.board.owner(0, 0), Some(0));

        // player 1's square lands against the top-right corner
        let placed = game.apply_move(6, 0, false, (10, 10)).unwrap();
        assert_eq!(placed.origin, (0, 18));
        assert_eq!(game.board.owner(0, 19), Some(1));
    }

    #[test]
    fn test_second_move_edge_vs_diagonal() {
        let mut game = two_player_game();
        game.apply_move(6, 0, false, (0, 0)).unwrap();
        game.pass().unwrap();
        // sharing only an edge with the square is illegal
        assert_eq!(
            game.apply_move(1, 0, false, (0, 2)).unwrap_err(),
            GameError::IllegalPlacement
        );
        // sharing only a diagonal is legal
        game.apply_move(1, 0, false, (2, 2)).unwrap();
        assert_eq!(game.board.owner(2, 2), Some(0));
    }

    #[test]
    fn test_pass_records_and_advances() {
        let mut game = two_player_game();
        game.pass().unwrap();
        assert_eq!(game.current_player, 1);
        assert_eq!(game.players[0].stats.passes, 1);
        assert_eq!(game.players[0].move_history.len(), 1);
        assert_eq!(game.turn_history.len(), 1);
        assert!(matches!(game.turn_history[0].action, TurnAction::Pass));

        game.pass().unwrap();
        assert_eq!(game.current_player, 0);
        assert_eq!(game.stats.total_moves, 2);
    }

    #[test]
    fn test_apply_then_undo_round_trip() {
        let mut game = two_player_game();
        // L-Tetromino covers the corner with its (0,0) cell
        game.apply_move(8, 0, false, (0, 0)).unwrap();
        game.pass().unwrap();

        let before = game.clone();
        game.apply_move(7, 0, false, (3, 2)).unwrap();
        game.undo().unwrap();

        assert_eq!(game.board, before.board);
        assert_eq!(game.players[0].score, before.players[0].score);
        assert_eq!(
            game.players[0].piece(7).unwrap().used,
            before.players[0].piece(7).unwrap().used
        );
        assert_eq!(game.current_player, before.current_player);
        assert_eq!(game.turn_history.len(), before.turn_history.len());
        assert_eq!(game.stats.total_moves, before.stats.total_moves);
        assert_eq!(game.players[0].stats, before.players[0].stats);
    }

    #[test]
    fn test_undo_pass_restores_passer() {
        let mut game = two_player_game();
        game.apply_move(1, 0, false, (0, 0)).unwrap();
        game.pass().unwrap();
        assert_eq!(game.current_player, 0);

        game.undo().unwrap();
        assert_eq!(game.current_player, 1);
        assert_eq!(game.players[1].stats.passes, 0);
        assert_eq!(game.players[1].move_history.len(), 0);
        assert_eq!(game.stats.total_moves, 1);
    }

    #[test]
    fn test_undo_empty_history_is_an_error() {
        let mut game = two_player_game();
        assert_eq!(game.undo().unwrap_err(), GameError::NothingToUndo);
        assert_eq!(game.stats.total_moves, 0);
    }

    #[test]
    fn test_reset() {
        let mut game = two_player_game();
        game.apply_move(6, 0, false, (0, 0)).unwrap();
        game.pass().unwrap();
        game.reset();

        assert_eq!(game.board, Board::new());
        assert_eq!(game.current_player, 0);
        assert!(game.turn_history.is_empty());
        assert_eq!(game.stats.total_moves, 0);
        for player in &game.players {
            assert_eq!(player.score, 0);
            assert!(player.move_history.is_empty());
            assert!(player.unused_pieces().count() == 21);
        }
    }

    #[test]
    fn test_leading_player_first_maximal_on_tie() {
        let mut game = GameState::new(4).unwrap();
        game.players[1].score = 10;
        game.players[3].score = 10;
        assert_eq!(game.leading_player(), 1);
    }
}
