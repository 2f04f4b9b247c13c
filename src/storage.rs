//! # Persistence
//!
//! Serializes the full game state as a JSON blob and reads it back. Saving
//! is a side effect the caller triggers after a successful transition, never
//! part of the core contract; a missing or corrupt file is reported and the
//! caller decides whether to start fresh.

use crate::game::GameState;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Format(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "storage I/O error: {}", err),
            StorageError::Format(err) => write!(f, "malformed saved game: {}", err),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Format(err)
    }
}

/// Writes the full state (board, players with pieces and histories, turn
/// history, counters, flags) to `path` as JSON.
pub fn save_game<P: AsRef<Path>>(state: &GameState, path: P) -> Result<(), StorageError> {
    let blob = serde_json::to_string(state)?;
    fs::write(path, blob)?;
    Ok(())
}

/// Reads a state previously written by [`save_game`].
pub fn load_game<P: AsRef<Path>>(path: P) -> Result<GameState, StorageError> {
    let blob = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&blob)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(format!("blokus-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_round_trip_preserves_every_field() {
        let mut game = GameState::new(2).unwrap();
        game.apply_move(6, 0, false, (0, 0)).unwrap();
        game.apply_move(11, 90, false, (0, 19)).unwrap();
        game.pass().unwrap();

        let path = temp_path("roundtrip");
        save_game(&game, &path).unwrap();
        let restored = load_game(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(restored.board, game.board);
        assert_eq!(restored.current_player, game.current_player);
        assert_eq!(restored.game_over, game.game_over);
        assert_eq!(restored.winner, game.winner);
        assert_eq!(restored.turn_history, game.turn_history);
        assert_eq!(restored.stats.total_moves, game.stats.total_moves);
        for (a, b) in restored.players.iter().zip(&game.players) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.color, b.color);
            assert_eq!(a.score, b.score);
            assert_eq!(a.pieces, b.pieces);
            assert_eq!(a.move_history, b.move_history);
            assert_eq!(a.stats, b.stats);
        }
    }

    #[test]
    fn test_restored_game_keeps_playing() {
        let mut game = GameState::new(2).unwrap();
        game.apply_move(1, 0, false, (0, 0)).unwrap();
        game.pass().unwrap();

        let path = temp_path("resume");
        save_game(&game, &path).unwrap();
        let mut restored = load_game(&path).unwrap();
        fs::remove_file(&path).unwrap();

        // diagonal continuation is still legal after the reload
        restored.apply_move(2, 0, false, (1, 1)).unwrap();
        assert_eq!(restored.players[0].score, 3);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let result = load_game(temp_path("does-not-exist"));
        assert!(matches!(result, Err(StorageError::Io(_))));
    }
}
