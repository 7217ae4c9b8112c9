//! Rotation module - quarter-turn rotation of square shape matrices
//!
//! `rotated[y][x] = original[N - 1 - x][y]`, i.e. 90° clockwise.
//! Orientation `k` is the base shape rotated `k` times.

use crate::pieces::{shape, Matrix};
use crate::types::{PieceKind, Rotation};

/// Rotate a square matrix 90° clockwise
pub fn rotate_cw(matrix: &Matrix) -> Matrix {
    let n = matrix.size();
    let mut out = Matrix::empty(n);
    for y in 0..n {
        for x in 0..n {
            out.set(x, y, matrix.get(y, n - 1 - x));
        }
    }
    out
}

/// Apply [`rotate_cw`] `turns` times
pub fn rotate_n(matrix: &Matrix, turns: usize) -> Matrix {
    (0..turns % 4).fold(*matrix, |m, _| rotate_cw(&m))
}

/// Shape of `kind` in the given orientation
pub fn rotated(kind: PieceKind, rotation: Rotation) -> Matrix {
    rotate_n(shape(kind), rotation.index())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_rotates_clockwise() {
        let east = rotated(PieceKind::T, Rotation::East);
        assert_eq!(east.row(0), &[0, 1, 0]);
        assert_eq!(east.row(1), &[0, 1, 1]);
        assert_eq!(east.row(2), &[0, 1, 0]);
    }

    #[test]
    fn i_turns_vertical_on_last_column() {
        let east = rotated(PieceKind::I, Rotation::East);
        for y in 0..4 {
            assert_eq!(east.row(y), &[0, 0, 0, 1]);
        }
    }

    #[test]
    fn four_turns_is_identity() {
        for kind in PieceKind::ALL {
            let base = shape(kind);
            let mut m = *base;
            for _ in 0..4 {
                m = rotate_cw(&m);
            }
            assert_eq!(&m, base);
        }
    }

    #[test]
    fn o_is_rotation_invariant() {
        for r in 0..4 {
            assert_eq!(&rotated(PieceKind::O, Rotation::from_index(r)), shape(PieceKind::O));
        }
    }
}
