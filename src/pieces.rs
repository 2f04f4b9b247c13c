//! # Piece Catalog
//!
//! Static definitions of the 21 canonical Blokus polyominoes. Each piece is
//! described by a rectangular binary cell matrix (1 = filled) together with a
//! derived cell count, which doubles as the score gained when the piece is
//! placed.

use serde::{Deserialize, Serialize};

/// A rectangular binary cell matrix describing a piece footprint.
pub type Shape = Vec<Vec<u8>>;

/// An immutable catalog entry for one of the 21 Blokus pieces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// Catalog id, unique in 1..=21
    pub id: u8,
    /// Display name (e.g. "T-Tetromino")
    pub name: String,
    /// Base cell matrix before any rotation or flip
    pub shape: Shape,
    /// Number of filled cells; equals the score gained on placement
    pub size: u32,
}

impl Piece {
    fn new(id: u8, name: &str, shape: Shape) -> Self {
        let size = shape
            .iter()
            .flatten()
            .filter(|&&cell| cell == 1)
            .count() as u32;
        Self {
            id,
            name: name.to_string(),
            shape,
            size,
        }
    }
}

/// A per-player copy of a catalog piece plus its `used` flag.
///
/// Created once per player at game start and only ever recreated by a reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceInstance {
    pub piece: Piece,
    pub used: bool,
}

impl PieceInstance {
    fn fresh(piece: Piece) -> Self {
        Self {
            piece,
            used: false,
        }
    }
}

/// The full catalog of 21 pieces, in canonical order.
pub fn catalog() -> Vec<Piece> {
    vec![
        Piece::new(1, "Monomino", vec![vec![1]]),
        Piece::new(2, "Domino", vec![vec![1, 1]]),
        Piece::new(3, "Straight Tromino", vec![vec![1, 1, 1]]),
        Piece::new(4, "L-Tromino", vec![vec![1, 0], vec![1, 1]]),
        Piece::new(5, "Straight Tetromino", vec![vec![1, 1, 1, 1]]),
        Piece::new(6, "Square Tetromino", vec![vec![1, 1], vec![1, 1]]),
        Piece::new(7, "T-Tetromino", vec![vec![1, 1, 1], vec![0, 1, 0]]),
        Piece::new(8, "L-Tetromino", vec![vec![1, 0], vec![1, 0], vec![1, 1]]),
        Piece::new(9, "Z-Tetromino", vec![vec![1, 1, 0], vec![0, 1, 1]]),
        Piece::new(10, "S-Tetromino", vec![vec![0, 1, 1], vec![1, 1, 0]]),
        Piece::new(11, "I-Pentomino", vec![vec![1, 1, 1, 1, 1]]),
        Piece::new(
            12,
            "T-Pentomino",
            vec![vec![1, 1, 1], vec![0, 1, 0], vec![0, 1, 0]],
        ),
        Piece::new(13, "U-Pentomino", vec![vec![1, 0, 1], vec![1, 1, 1]]),
        Piece::new(
            14,
            "V-Pentomino",
            vec![vec![1, 0, 0], vec![1, 0, 0], vec![1, 1, 1]],
        ),
        Piece::new(
            15,
            "W-Pentomino",
            vec![vec![1, 0, 0], vec![1, 1, 0], vec![0, 1, 1]],
        ),
        Piece::new(
            16,
            "X-Pentomino",
            vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 1, 0]],
        ),
        Piece::new(17, "Y-Pentomino", vec![vec![0, 1, 0, 0], vec![1, 1, 1, 1]]),
        Piece::new(
            18,
            "Z-Pentomino",
            vec![vec![1, 1, 0], vec![0, 1, 0], vec![0, 1, 1]],
        ),
        Piece::new(
            19,
            "F-Pentomino",
            vec![vec![0, 1, 1], vec![1, 1, 0], vec![0, 1, 0]],
        ),
        Piece::new(20, "P-Pentomino", vec![vec![1, 1], vec![1, 1], vec![1, 0]]),
        Piece::new(
            21,
            "N-Pentomino",
            vec![vec![0, 1, 1], vec![1, 1, 0], vec![1, 0, 0]],
        ),
    ]
}

/// A fresh, fully unused set of all 21 pieces for one player.
pub fn fresh_set() -> Vec<PieceInstance> {
    catalog().into_iter().map(PieceInstance::fresh).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_21_unique_pieces() {
        let pieces = catalog();
        assert_eq!(pieces.len(), 21);
        for (idx, piece) in pieces.iter().enumerate() {
            assert_eq!(piece.id as usize, idx + 1);
        }
    }

    #[test]
    fn test_piece_sizes() {
        let pieces = catalog();
        assert_eq!(pieces[0].size, 1);
        assert_eq!(pieces[1].size, 2);
        // A full set covers 89 board cells
        let total: u32 = pieces.iter().map(|p| p.size).sum();
        assert_eq!(total, 89);
        for piece in &pieces {
            assert!(piece.size >= 1 && piece.size <= 5);
        }
    }

    #[test]
    fn test_shapes_are_rectangular() {
        for piece in catalog() {
            let cols = piece.shape[0].len();
            for row in &piece.shape {
                assert_eq!(row.len(), cols, "piece {} is ragged", piece.name);
            }
        }
    }

    #[test]
    fn test_fresh_set_is_unused() {
        let set = fresh_set();
        assert_eq!(set.len(), 21);
        assert!(set.iter().all(|instance| !instance.used));
    }
}
