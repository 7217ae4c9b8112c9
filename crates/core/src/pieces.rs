//! Pieces module - tetromino shape library and the active piece value
//!
//! Shapes are square binary matrices (4x4 for I, 2x2 for O, 3x3 otherwise)
//! stored in fixed-size arrays so deriving an orientation never allocates.
//! A piece's occupancy is always derived from kind + rotation + position.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::rotation::rotated;
use crate::types::{PieceKind, Position, Rotation, GRID_WIDTH};

/// Largest shape side length
pub const MAX_SHAPE_SIZE: usize = 4;

/// Upper bound on occupied cells of any shape matrix
pub const MAX_MINOS: usize = MAX_SHAPE_SIZE * MAX_SHAPE_SIZE;

/// Occupied cells of a piece, as absolute grid coordinates
pub type PieceCells = ArrayVec<Position, MAX_MINOS>;

/// Square binary matrix of side `size` (only the top-left `size x size`
/// block of `rows` is meaningful; the rest stays zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix {
    size: u8,
    rows: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Matrix {
    /// Build a matrix from its rows. Panics in const context if `size` is too large.
    pub const fn new(size: usize, rows: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) -> Self {
        assert!(size > 0 && size <= MAX_SHAPE_SIZE);
        Self {
            size: size as u8,
            rows,
        }
    }

    /// All-zero matrix of side `size`
    pub const fn empty(size: usize) -> Self {
        Self::new(size, [[0; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE])
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Cell at column `x`, row `y`. Out-of-range reads return 0.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x >= self.size() || y >= self.size() {
            return 0;
        }
        self.rows[y][x]
    }

    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.size() && y < self.size() {
            self.rows[y][x] = value;
        }
    }

    /// Row `y` as a slice of length `size`
    pub fn row(&self, y: usize) -> &[u8] {
        &self.rows[y][..self.size()]
    }

    /// `(x, y)` offsets of every non-zero cell, row-major
    pub fn occupied(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size();
        (0..n).flat_map(move |y| {
            (0..n).filter_map(move |x| (self.rows[y][x] != 0).then_some((x as i8, y as i8)))
        })
    }
}

const I_SHAPE: Matrix = Matrix::new(4, [[1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const O_SHAPE: Matrix = Matrix::new(2, [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const T_SHAPE: Matrix = Matrix::new(3, [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const S_SHAPE: Matrix = Matrix::new(3, [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const Z_SHAPE: Matrix = Matrix::new(3, [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const J_SHAPE: Matrix = Matrix::new(3, [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const L_SHAPE: Matrix = Matrix::new(3, [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);

/// Base (rotation 0) shape matrix for a piece kind
pub fn shape(kind: PieceKind) -> &'static Matrix {
    match kind {
        PieceKind::I => &I_SHAPE,
        PieceKind::O => &O_SHAPE,
        PieceKind::T => &T_SHAPE,
        PieceKind::S => &S_SHAPE,
        PieceKind::Z => &Z_SHAPE,
        PieceKind::J => &J_SHAPE,
        PieceKind::L => &L_SHAPE,
    }
}

/// Horizontally centered spawn anchor on row 0
pub fn spawn_position(kind: PieceKind) -> Position {
    let width = shape(kind).size() as i8;
    Position::new((GRID_WIDTH / 2) as i8 - width / 2, 0)
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub position: Position,
    pub rotation: Rotation,
}

impl Piece {
    /// Fresh piece at its spawn position and rotation 0
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            position: spawn_position(kind),
            rotation: Rotation::North,
        }
    }

    pub fn with_position(self, position: Position) -> Self {
        Self { position, ..self }
    }

    pub fn with_rotation(self, rotation: Rotation) -> Self {
        Self { rotation, ..self }
    }

    /// Shape matrix for the current rotation
    pub fn matrix(&self) -> Matrix {
        rotated(self.kind, self.rotation)
    }

    /// Absolute cells at the piece's own position
    pub fn cells(&self) -> PieceCells {
        self.cells_at(self.position)
    }

    /// Absolute cells if the piece were anchored at `position`
    pub fn cells_at(&self, position: Position) -> PieceCells {
        self.matrix()
            .occupied()
            .map(|(dx, dy)| position.offset(dx, dy))
            .collect()
    }
}
