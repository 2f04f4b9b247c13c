//! # Transform Engine
//!
//! Pure functions producing rotated/flipped variants of a piece's cell
//! matrix. The contract mirrors the physical act of handling a tile: the flip
//! is applied first, then the rotation. Flipping then rotating 90° is
//! generally not the same matrix as rotating then flipping, so the order
//! matters.

use crate::pieces::Shape;
use serde::{Deserialize, Serialize};

/// The four rotations a piece can take, in enumeration order.
pub const ROTATIONS: [u16; 4] = [0, 90, 180, 270];

/// Rotates a cell matrix 90° clockwise: `out[c][R-1-r] = in[r][c]`.
///
/// Four applications return the original matrix.
pub fn rotate_cw(shape: &Shape) -> Shape {
    let rows = shape.len();
    let cols = shape[0].len();
    let mut out = vec![vec![0u8; rows]; cols];
    for (r, row) in shape.iter().enumerate() {
        for (c, &cell) in row.iter().enumerate() {
            out[c][rows - 1 - r] = cell;
        }
    }
    out
}

/// Mirrors a cell matrix horizontally by reversing each row.
///
/// Two applications return the original matrix.
pub fn flip_horizontal(shape: &Shape) -> Shape {
    shape
        .iter()
        .map(|row| row.iter().rev().copied().collect())
        .collect()
}

/// Applies flip (first) and rotation (second) to a cell matrix.
///
/// Degenerate input (empty or ragged matrix) is returned unchanged rather
/// than rejected; callers never see an error from here.
pub fn transform(shape: &Shape, rotation: u16, flipped: bool) -> Shape {
    if shape.is_empty()
        || shape[0].is_empty()
        || shape.iter().any(|row| row.len() != shape[0].len())
    {
        return shape.clone();
    }
    let mut out = if flipped {
        flip_horizontal(shape)
    } else {
        shape.clone()
    };
    for _ in 0..(rotation / 90) % 4 {
        out = rotate_cw(&out);
    }
    out
}

/// A piece footprint after a specific rotation and flip.
///
/// Transient by design: orientations are recomputed on demand and never
/// persisted. Two orientations are equivalent when their `cells` match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orientation {
    pub rotation: u16,
    pub flipped: bool,
    pub cells: Shape,
}

impl Orientation {
    pub fn of(shape: &Shape, rotation: u16, flipped: bool) -> Self {
        Self {
            rotation,
            flipped,
            cells: transform(shape, rotation, flipped),
        }
    }
}

/// Every distinct orientation of a shape, at most 8.
///
/// Deduplicated by structural equality of the resulting matrix, keeping the
/// first occurrence (rotations ascending, unflipped before flipped).
pub fn all_orientations(shape: &Shape) -> Vec<Orientation> {
    let mut distinct: Vec<Orientation> = Vec::new();
    for &rotation in &ROTATIONS {
        for flipped in [false, true] {
            let orientation = Orientation::of(shape, rotation, flipped);
            if !distinct.iter().any(|seen| seen.cells == orientation.cells) {
                distinct.push(orientation);
            }
        }
    }
    distinct
}
